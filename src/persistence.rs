use std::collections::HashSet;

use serde_json::Value;

use crate::db::KeyValueStore;
use crate::error::TaskpadError;
use crate::models::Task;

/// The single slot holding the serialized collection.
pub const TASKS_KEY: &str = "tasks";

/// Load the collection from `kv`, degrading to an empty one on any problem.
///
/// Records written before `completed`, `priority` or `completedAt` existed get
/// defaults. Records without a numeric `id` or string `text` are skipped, and
/// duplicate ids are renumbered past the current maximum.
pub fn load(kv: &dyn KeyValueStore) -> Vec<Task> {
    let raw = match kv.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read saved tasks, starting empty");
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => records,
        Ok(Value::Null) => return Vec::new(),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "saved tasks are not a list, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "saved tasks are not valid JSON, starting empty");
            return Vec::new();
        }
    };

    let mut tasks: Vec<Task> = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Task>(record) {
            Ok(task) => tasks.push(task),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable saved task"),
        }
    }
    renumber_duplicates(&mut tasks);
    tracing::debug!(count = tasks.len(), "tasks loaded");
    tasks
}

/// Write the whole collection to the slot.
pub fn save(kv: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<(), TaskpadError> {
    let blob = serde_json::to_string(tasks)?;
    kv.set(TASKS_KEY, &blob)?;
    tracing::debug!(count = tasks.len(), "tasks saved");
    Ok(())
}

/// Observer that saves after every change. A failed save is logged and the
/// in-memory collection stays authoritative.
pub fn autosave<K: KeyValueStore + 'static>(mut kv: K) -> impl FnMut(&[Task]) {
    move |tasks| {
        if let Err(e) = save(&mut kv, tasks) {
            tracing::warn!(code = e.code.as_str(), error = %e, "saving tasks failed");
        }
    }
}

fn renumber_duplicates(tasks: &mut [Task]) {
    let mut next = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks.iter_mut() {
        if !seen.insert(task.id) {
            next = next.wrapping_add(1);
            while seen.contains(&next) {
                next = next.wrapping_add(1);
            }
            tracing::warn!(old = task.id, new = next, "renumbering duplicate task id");
            task.id = next;
            seen.insert(next);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
