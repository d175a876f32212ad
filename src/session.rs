use crate::edit::EditState;
use crate::models::{Priority, Task};
use crate::store::TaskStore;
use crate::view::{self, Counts, Filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

/// Everything the task page keeps between user actions: the store plus the
/// draft input, priority selector, filter, search text and edit state.
pub struct Session {
    store: TaskStore,
    edit: EditState,
    draft: String,
    priority: Priority,
    filter: Filter,
    search: String,
}

impl Session {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            edit: EditState::Idle,
            draft: String::new(),
            priority: Priority::Medium,
            filter: Filter::All,
            search: String::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn can_add(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub fn bulk_enabled(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn can_clear_completed(&self) -> bool {
        self.counts().completed > 0
    }

    /// Add the draft as a task. On success the draft is cleared and the
    /// priority selector goes back to Medium.
    pub fn submit(&mut self) -> Option<u64> {
        let id = self.store.add(&self.draft, self.priority)?;
        self.draft.clear();
        self.priority = Priority::Medium;
        Some(id)
    }

    /// Keyboard contract of the add input. Escape never touches edit state.
    pub fn key(&mut self, key: Key) -> Option<u64> {
        match key {
            Key::Enter => self.submit(),
            Key::Escape => {
                self.draft.clear();
                None
            }
        }
    }

    pub fn toggle_complete(&mut self, id: u64) -> bool {
        self.store.toggle_complete(id)
    }

    pub fn delete_task(&mut self, id: u64) -> bool {
        let changed = self.store.delete_task(id);
        self.drop_stale_edit();
        changed
    }

    pub fn clear_completed(&mut self) -> usize {
        let removed = self.store.clear_completed();
        self.drop_stale_edit();
        removed
    }

    pub fn mark_all_completed(&mut self) -> bool {
        self.store.mark_all_completed()
    }

    pub fn mark_all_pending(&mut self) -> bool {
        self.store.mark_all_pending()
    }

    /// Start editing task `id`. Returns false if there is no such task.
    pub fn start_edit(&mut self, id: u64) -> bool {
        match self.store.get(id) {
            Some(task) => {
                self.edit.start(task);
                true
            }
            None => false,
        }
    }

    pub fn set_scratch(&mut self, text: &str) -> bool {
        self.edit.set_scratch(text)
    }

    pub fn save_edit(&mut self, id: u64) -> bool {
        self.edit.save(id, &mut self.store)
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    pub fn visible(&self) -> Vec<&Task> {
        view::project(self.store.tasks(), self.filter, &self.search)
    }

    pub fn counts(&self) -> Counts {
        Counts::of(self.store.tasks())
    }

    fn drop_stale_edit(&mut self) {
        if let Some(id) = self.edit.editing_id() {
            if self.store.get(id).is_none() {
                self.edit.cancel();
            }
        }
    }
}
