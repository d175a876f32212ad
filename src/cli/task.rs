use std::path::Path;

use serde_json::json;

use crate::cli::open_task_store;
use crate::error::TaskpadError;
use crate::models::Priority;
use crate::output;
use crate::view::{self, Counts, Filter};

pub fn run_add(
    text: &str,
    priority: Priority,
    json_output: bool,
    store_flag: Option<&Path>,
) -> Result<i32, TaskpadError> {
    let mut store = open_task_store(store_flag)?;
    let added = store.add(text, priority).and_then(|id| store.get(id));

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "task": added.map(output::json::task_json),
            "counts": output::json::counts_json(&Counts::of(store.tasks()))
        }))));
    } else {
        match added {
            Some(t) => println!("Added task {}: {} ({})", t.id, t.text, t.priority.as_str()),
            None => println!("Nothing added: task text is empty."),
        }
    }
    Ok(0)
}

pub fn run_list(
    filter: Filter,
    search: &str,
    json_output: bool,
    store_flag: Option<&Path>,
) -> Result<i32, TaskpadError> {
    let store = open_task_store(store_flag)?;
    let visible = view::project(store.tasks(), filter, search);
    let counts = Counts::of(store.tasks());

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(
            output::json::view_json(&visible, filter, search, &counts)
        )));
    } else {
        output::text::print_counts(&counts);
        output::text::print_task_list(&visible);
    }
    Ok(0)
}

pub fn run_toggle(id: u64, json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let mut store = open_task_store(store_flag)?;
    let changed = store.toggle_complete(id);
    let task = store.get(id);

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "changed": changed,
            "task": task.map(output::json::task_json)
        }))));
    } else {
        match task {
            Some(t) if t.completed => println!("Task {} completed", t.id),
            Some(t) => println!("Task {} pending", t.id),
            None => println!("No task with id {id}"),
        }
    }
    Ok(0)
}

pub fn run_edit(id: u64, text: &str, json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let mut store = open_task_store(store_flag)?;
    let changed = store.edit_text(id, text);
    let task = store.get(id);

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "changed": changed,
            "task": task.map(output::json::task_json)
        }))));
    } else if let Some(t) = task {
        println!("Task {}: {}", t.id, t.text);
    } else {
        println!("No task with id {id}");
    }
    Ok(0)
}

pub fn run_delete(id: u64, json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let mut store = open_task_store(store_flag)?;
    let changed = store.delete_task(id);
    let deleted = changed.then_some(id);

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "changed": changed,
            "deleted": deleted,
            "counts": output::json::counts_json(&Counts::of(store.tasks()))
        }))));
    } else if changed {
        println!("Deleted task {id}");
    } else {
        println!("No task with id {id}");
    }
    Ok(0)
}

pub fn run_clear_completed(json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let mut store = open_task_store(store_flag)?;
    let removed = store.clear_completed();

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "removed": removed,
            "counts": output::json::counts_json(&Counts::of(store.tasks()))
        }))));
    } else {
        println!("Cleared {removed} completed task(s)");
    }
    Ok(0)
}

pub fn run_mark_all(completed: bool, json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let mut store = open_task_store(store_flag)?;
    let changed = if completed {
        store.mark_all_completed()
    } else {
        store.mark_all_pending()
    };
    let counts = Counts::of(store.tasks());

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "changed": changed,
            "counts": output::json::counts_json(&counts)
        }))));
    } else if !changed {
        println!("No tasks yet.");
    } else {
        let state = if completed { "completed" } else { "pending" };
        println!("Marked {} task(s) {state}", counts.total);
    }
    Ok(0)
}
