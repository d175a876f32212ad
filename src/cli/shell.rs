use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::cli::open_task_store;
use crate::error::TaskpadError;
use crate::models::Priority;
use crate::output;
use crate::session::{Key, Session};
use crate::view::Filter;

#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

// Free-text arguments are parsed only for validation; the text applied is
// the raw rest of the line, so spacing survives.
#[derive(Subcommand)]
enum ShellCommand {
    /// Set the add input
    Type {
        #[arg(value_name = "TEXT", num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        _text: Vec<String>,
    },
    /// Select the priority for the next add
    Priority {
        #[arg(value_enum)]
        priority: Priority,
    },
    /// Add the input as a task
    Enter,
    /// Clear the add input
    Escape,
    /// Shorthand for `type <text>` followed by `enter`
    Add {
        #[arg(value_name = "TEXT", num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        _text: Vec<String>,
    },
    Search {
        #[arg(value_name = "TEXT", num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        _text: Vec<String>,
    },
    Filter {
        #[arg(value_enum)]
        filter: Filter,
    },
    Toggle {
        id: u64,
    },
    Delete {
        id: u64,
    },
    /// Start editing a task
    Edit {
        id: u64,
    },
    /// Change the text of the task being edited
    Scratch {
        #[arg(value_name = "TEXT", num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        _text: Vec<String>,
    },
    Save,
    Cancel,
    CompleteAll,
    PendingAll,
    ClearCompleted,
    Show,
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(json_output: bool, store_flag: Option<&Path>) -> Result<i32, TaskpadError> {
    let mut session = Session::new(open_task_store(store_flag)?);
    let stdin = io::stdin();
    let interactive = stdin.is_terminal() && !json_output;

    if interactive {
        output::text::print_session(&session);
    }
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words[0].starts_with('#') {
            continue;
        }

        let result = ShellLine::try_parse_from(words.iter().copied())
            .map_err(|e| TaskpadError::validation(first_line(&e.to_string())))
            .and_then(|parsed| apply(&mut session, parsed.command, rest_of_line(&line)));

        match result {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => render(&session, json_output),
            Err(e) => {
                tracing::debug!(line = %line, error = %e, "shell command refused");
                if json_output {
                    println!("{}", output::json::error(&e));
                } else {
                    eprintln!("Error: {}", e.message);
                }
            }
        }
    }
    Ok(0)
}

fn apply(session: &mut Session, command: ShellCommand, rest: &str) -> Result<Flow, TaskpadError> {
    match command {
        ShellCommand::Type { .. } => session.set_draft(rest),
        ShellCommand::Priority { priority } => session.set_priority(priority),
        ShellCommand::Enter => submit(session)?,
        ShellCommand::Escape => {
            session.key(Key::Escape);
        }
        ShellCommand::Add { .. } => {
            session.set_draft(rest);
            submit(session)?;
        }
        ShellCommand::Search { .. } => session.set_search(rest),
        ShellCommand::Filter { filter } => session.set_filter(filter),
        ShellCommand::Toggle { id } => {
            if !session.toggle_complete(id) {
                return Err(no_such_task(id));
            }
        }
        ShellCommand::Delete { id } => {
            if !session.delete_task(id) {
                return Err(no_such_task(id));
            }
        }
        ShellCommand::Edit { id } => {
            if !session.start_edit(id) {
                return Err(no_such_task(id));
            }
        }
        ShellCommand::Scratch { .. } => {
            if !session.set_scratch(rest) {
                return Err(TaskpadError::not_editing());
            }
        }
        ShellCommand::Save => {
            let id = session.edit().editing_id().ok_or_else(TaskpadError::not_editing)?;
            session.save_edit(id);
        }
        ShellCommand::Cancel => session.cancel_edit(),
        ShellCommand::CompleteAll => {
            require_tasks(session)?;
            session.mark_all_completed();
        }
        ShellCommand::PendingAll => {
            require_tasks(session)?;
            session.mark_all_pending();
        }
        ShellCommand::ClearCompleted => {
            if !session.can_clear_completed() {
                return Err(TaskpadError::nothing_completed());
            }
            session.clear_completed();
        }
        ShellCommand::Show => {}
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn submit(session: &mut Session) -> Result<(), TaskpadError> {
    if !session.can_add() {
        return Err(TaskpadError::nothing_to_add());
    }
    session.key(Key::Enter);
    Ok(())
}

fn require_tasks(session: &Session) -> Result<(), TaskpadError> {
    if session.bulk_enabled() {
        Ok(())
    } else {
        Err(TaskpadError::no_tasks())
    }
}

fn no_such_task(id: u64) -> TaskpadError {
    TaskpadError::validation(format!("No task with id {id}"))
}

fn render(session: &Session, json_output: bool) {
    if json_output {
        println!("{}", output::json::success(output::json::session_json(session)));
    } else {
        output::text::print_session(session);
    }
}

/// Everything after the command word and the one separator following it.
fn rest_of_line(line: &str) -> &str {
    let line = line.trim_start();
    let Some(end) = line.find(char::is_whitespace) else {
        return "";
    };
    let mut after = line[end..].chars();
    after.next();
    after.as_str()
}

fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or_default().trim_start_matches("error: ").to_string()
}
