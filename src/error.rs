use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    StorageError,
    IoError,
    ValidationError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StorageError => "STORAGE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskpadError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskpadError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn nothing_to_add() -> Self {
        Self::validation("Nothing to add: the input is empty")
    }

    pub fn no_tasks() -> Self {
        Self::validation("There are no tasks yet")
    }

    pub fn nothing_completed() -> Self {
        Self::validation("No completed tasks to clear")
    }

    pub fn not_editing() -> Self {
        Self::validation("No task is being edited. Use `edit <id>` first.")
    }
}

impl From<rusqlite::Error> for TaskpadError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<std::io::Error> for TaskpadError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

impl From<serde_json::Error> for TaskpadError {
    fn from(e: serde_json::Error) -> Self {
        Self::storage(format!("serialization failed: {e}"))
    }
}
