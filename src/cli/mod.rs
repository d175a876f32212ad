pub mod commands;
pub mod shell;
pub mod status;
pub mod task;

pub use commands::*;

use std::path::{Path, PathBuf};

use crate::db::{self, SqliteKv};
use crate::error::TaskpadError;
use crate::output;
use crate::persistence;
use crate::store::TaskStore;

pub fn run(cmd: Commands, json_output: bool, store_flag: Option<&Path>) -> i32 {
    let result = match cmd {
        Commands::Add { text, priority } => task::run_add(&text, priority, json_output, store_flag),
        Commands::List { filter, search } => task::run_list(filter, &search, json_output, store_flag),
        Commands::Toggle { id } => task::run_toggle(id, json_output, store_flag),
        Commands::Edit { id, text } => task::run_edit(id, &text, json_output, store_flag),
        Commands::Delete { id } => task::run_delete(id, json_output, store_flag),
        Commands::ClearCompleted => task::run_clear_completed(json_output, store_flag),
        Commands::CompleteAll => task::run_mark_all(true, json_output, store_flag),
        Commands::PendingAll => task::run_mark_all(false, json_output, store_flag),
        Commands::Status => status::run(json_output, store_flag),
        Commands::Shell => shell::run(json_output, store_flag),
    };
    match result {
        Ok(code) => code,
        Err(e) => report_error(&e, json_output),
    }
}

/// Open the store file and return a task store that autosaves into it.
pub fn open_task_store(store_flag: Option<&Path>) -> Result<TaskStore, TaskpadError> {
    let path: PathBuf = match store_flag {
        Some(p) => p.to_path_buf(),
        None => db::default_store_path()?,
    };
    let kv = SqliteKv::new(db::open_store(&path)?);
    let mut store = TaskStore::from_tasks(persistence::load(&kv));
    store.subscribe(persistence::autosave(kv));
    Ok(store)
}

/// Print `err` in the requested format and return the error exit code.
pub fn report_error(err: &TaskpadError, json_output: bool) -> i32 {
    if json_output {
        println!("{}", output::json::pretty(&output::json::error(err)));
    } else {
        eprintln!("Error: {}", err.message);
    }
    1
}
