use serde_json::{json, Value};

use crate::edit::EditState;
use crate::error::TaskpadError;
use crate::models::Task;
use crate::session::Session;
use crate::view::{Counts, Filter};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskpadError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "text": t.text,
        "completed": t.completed,
        "priority": t.priority.as_str(),
        "completedAt": t.completed_at
    })
}

pub fn tasks_json<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Value {
    Value::Array(tasks.into_iter().map(task_json).collect())
}

pub fn counts_json(c: &Counts) -> Value {
    json!({
        "total": c.total,
        "completed": c.completed,
        "pending": c.pending
    })
}

pub fn view_json(tasks: &[&Task], filter: Filter, search: &str, counts: &Counts) -> Value {
    json!({
        "filter": filter.as_str(),
        "search": search,
        "tasks": tasks_json(tasks.iter().copied()),
        "counts": counts_json(counts)
    })
}

pub fn edit_json(edit: &EditState) -> Value {
    match edit {
        EditState::Idle => Value::Null,
        EditState::Editing { id, scratch } => json!({ "id": id, "scratch": scratch }),
    }
}

/// Full page state of a shell session.
pub fn session_json(s: &Session) -> Value {
    let visible = s.visible();
    let mut v = view_json(&visible, s.filter(), s.search(), &s.counts());
    v["draft"] = json!(s.draft());
    v["priority"] = json!(s.priority().as_str());
    v["editing"] = edit_json(s.edit());
    v["can_add"] = json!(s.can_add());
    v["bulk_enabled"] = json!(s.bulk_enabled());
    v
}
