use crate::models::{Priority, Task};

type Observer = Box<dyn FnMut(&[Task])>;

/// Owns the ordered task collection and every mutation of it.
///
/// Operations never fail: unknown ids and blank input are absorbed as no-ops.
/// Each one reports whether the collection changed, and observers registered
/// with [`TaskStore::subscribe`] see the full collection after every change.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    observers: Vec<Observer>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::from_tasks(Vec::new())
    }

    /// Build a store around an existing collection. Ids must already be unique.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max.wrapping_add(1));
        Self {
            tasks,
            next_id,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[Task]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Append a task. Returns `None` (and changes nothing) if `text` is blank.
    /// Accepted text is stored as given; trimming only decides acceptance.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.fresh_id();
        self.tasks.push(Task::new(id, text, priority));
        tracing::debug!(id, priority = priority.as_str(), "task added");
        self.notify();
        Some(id)
    }

    pub fn toggle_complete(&mut self, id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        let completed = !task.completed;
        task.set_completed(completed);
        tracing::debug!(id, completed, "task toggled");
        self.notify();
        true
    }

    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        tracing::debug!(id, "task deleted");
        self.notify();
        true
    }

    /// Replace a task's text verbatim. Unlike [`TaskStore::add`] this neither
    /// trims nor rejects empty text.
    pub fn edit_text(&mut self, id: u64, text: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.text = text.to_string();
        tracing::debug!(id, "task text edited");
        self.notify();
        true
    }

    /// Remove every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            tracing::debug!(removed, "completed tasks cleared");
            self.notify();
        }
        removed
    }

    /// Complete every task, refreshing the timestamp of already-completed ones.
    pub fn mark_all_completed(&mut self) -> bool {
        if self.tasks.is_empty() {
            return false;
        }
        for task in &mut self.tasks {
            task.set_completed(true);
        }
        tracing::debug!(count = self.tasks.len(), "all tasks completed");
        self.notify();
        true
    }

    pub fn mark_all_pending(&mut self) -> bool {
        if self.tasks.is_empty() {
            return false;
        }
        for task in &mut self.tasks {
            task.set_completed(false);
        }
        tracing::debug!(count = self.tasks.len(), "all tasks pending");
        self.notify();
        true
    }

    /// Next counter value not held by any task. The counter wraps past
    /// `u64::MAX` and skips taken ids, so it never hands out a duplicate.
    fn fresh_id(&mut self) -> u64 {
        loop {
            let candidate = self.next_id;
            self.next_id = candidate.wrapping_add(1);
            if self.get(candidate).is_none() {
                return candidate;
            }
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.tasks);
        }
    }
}
