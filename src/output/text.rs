use crate::edit::EditState;
use crate::models::Task;
use crate::session::Session;
use crate::view::Counts;

pub fn print_task(t: &Task) {
    let mark = if t.completed { "x" } else { " " };
    println!("  [{mark}] {:>4}  {} ({})", t.id, t.text, t.priority.as_str());
    if let Some(ref at) = t.completed_at {
        println!("              Completed on: {at}");
    }
}

pub fn print_task_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks yet. Add your first task.");
        return;
    }
    for t in tasks {
        print_task(t);
    }
}

pub fn print_counts(c: &Counts) {
    println!("Total: {}  Completed: {}  Pending: {}", c.total, c.completed, c.pending);
}

pub fn print_session(s: &Session) {
    println!();
    println!("Input: \"{}\"  Priority: {}", s.draft(), s.priority().as_str());
    println!("Filter: {}  Search: \"{}\"", s.filter().as_str(), s.search());
    print_counts(&s.counts());
    let visible = s.visible();
    if visible.is_empty() {
        println!("No tasks yet. Add your first task.");
    }
    for t in visible {
        match s.edit() {
            EditState::Editing { id, scratch } if *id == t.id => {
                println!("  [*] {:>4}  editing: \"{scratch}\" (save / cancel)", t.id);
            }
            _ => print_task(t),
        }
    }
}
