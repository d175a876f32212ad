use crate::models::Task;
use crate::store::TaskStore;

/// Edit-in-place state. At most one task is edited at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: u64, scratch: String },
}

impl EditState {
    /// Begin editing `task`, discarding any edit already in progress.
    pub fn start(&mut self, task: &Task) {
        *self = Self::Editing {
            id: task.id,
            scratch: task.text.clone(),
        };
    }

    /// Update the scratch text. Returns false when idle.
    pub fn set_scratch(&mut self, text: &str) -> bool {
        match self {
            Self::Editing { scratch, .. } => {
                *scratch = text.to_string();
                true
            }
            Self::Idle => false,
        }
    }

    /// Commit the scratch text to task `id` and go idle.
    ///
    /// Returns whether the store changed; saving while idle does nothing.
    pub fn save(&mut self, id: u64, store: &mut TaskStore) -> bool {
        match std::mem::take(self) {
            Self::Editing { scratch, .. } => store.edit_text(id, &scratch),
            Self::Idle => false,
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn editing_id(&self) -> Option<u64> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            Self::Idle => None,
        }
    }

    pub fn scratch(&self) -> Option<&str> {
        match self {
            Self::Editing { scratch, .. } => Some(scratch),
            Self::Idle => None,
        }
    }
}
