use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TaskpadError;

use super::migrations;

/// Default store location, relative to the current directory.
pub fn default_store_path() -> Result<PathBuf, TaskpadError> {
    let cwd = env::current_dir()?;
    Ok(cwd.join(".taskpad").join("taskpad.db"))
}

/// Open (creating if needed) the store database at `path` and run migrations.
pub fn open_store(path: &Path) -> Result<Connection, TaskpadError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| TaskpadError::storage(format!("{}: {e}", parent.display())))?;
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    tracing::debug!(path = %path.display(), "store opened");
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskpadError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
