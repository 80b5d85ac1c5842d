//! Todo store error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during todo store operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Validation error: text is empty after trimming.
    #[error("Todo text cannot be empty")]
    EmptyText,

    /// Import document is not a sequence of todo records.
    #[error("Invalid import document: {0}")]
    InvalidImport(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TodoError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            TodoError::EmptyText => "Enter a task before adding it.",
            TodoError::InvalidImport(_) => "Could not read that file. Select a valid todo export.",
            TodoError::Storage(_) => "Your tasks could not be saved. Please try again.",
        }
    }
}
