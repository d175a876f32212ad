use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TaskpadError;

/// A string-to-string slot store, the durable side of the persistence bridge.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TaskpadError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskpadError>;
}

/// Key-value slots kept in the `kv` table of a SQLite database.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>, TaskpadError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskpadError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    slots: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, TaskpadError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskpadError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Shared handle, so a caller can keep reading a slot store that an observer owns.
impl<K: KeyValueStore> KeyValueStore for std::rc::Rc<std::cell::RefCell<K>> {
    fn get(&self, key: &str) -> Result<Option<String>, TaskpadError> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskpadError> {
        self.borrow_mut().set(key, value)
    }
}
