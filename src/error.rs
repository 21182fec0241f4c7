// Error types for task operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Rejected user input (priority, due date, description)
    #[error("{0}")]
    Validation(String),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid task data in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TaskError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
