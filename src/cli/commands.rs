use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::Priority;
use crate::view::Filter;

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskpad",
    version = VERSION,
    about = "Single-list task manager",
    after_help = "\
NOTE:
  All tasks live in one slot of a SQLite file (default .taskpad/taskpad.db in the
  current directory, override with --store or TASKPAD_STORE). A missing or corrupt
  slot loads as an empty list.

NO-OPS:
  Unknown ids, blank text on add and bulk actions on an empty list change nothing
  and still exit 0. `edit` stores the text verbatim, even when empty.

LOGGING:
  Set TASKPAD_LOG (e.g. TASKPAD_LOG=debug) to see events on stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of the store file
    #[arg(long, global = true, env = "TASKPAD_STORE")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text, stored as given (blank text is ignored)
        text: String,
        #[arg(long, short, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List tasks, optionally filtered and searched
    List {
        #[arg(long, short, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Case-insensitive text to search for
        #[arg(long, short, default_value = "")]
        search: String,
    },
    /// Flip a task between completed and pending
    Toggle {
        id: u64,
    },
    /// Replace a task's text
    Edit {
        id: u64,
        text: String,
    },
    /// Delete a task
    Delete {
        id: u64,
    },
    /// Remove all completed tasks
    ClearCompleted,
    /// Mark every task completed
    CompleteAll,
    /// Mark every task pending
    PendingAll,
    /// Show total/completed/pending counts
    Status,
    /// Interactive session reading commands from stdin
    #[command(after_help = "\
COMMANDS (one per line):
  type <text>       set the add input          priority <High|Medium|Low>
  enter             add the input as a task    escape    clear the input
  add <text>        type + enter               search [text]
  filter <all|completed|pending>
  toggle <id>       delete <id>
  edit <id>         start editing              scratch <text>  change edit text
  save              commit the edit            cancel          discard the edit
  complete-all      pending-all                clear-completed
  show              quit")]
    Shell,
}
