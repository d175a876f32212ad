use std::path::Path;

use serde_json::json;

use crate::cli::open_task_store;
use crate::error::TaskpadError;
use crate::output;
use crate::view::Counts;

pub fn run(json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let store = open_task_store(store_flag)?;
    let counts = Counts::of(store.tasks());

    if json_output {
        println!("{}", output::json::pretty(&output::json::success(json!({
            "counts": output::json::counts_json(&counts)
        }))));
    } else {
        output::text::print_counts(&counts);
    }
    Ok(0)
}
