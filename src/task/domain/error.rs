//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A text field exceeds its storage column width.
    #[error("{field} must be at most {max} characters, got {length}")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Maximum character count.
        max: usize,
        /// Character count of the rejected value.
        length: usize,
    },

    /// A timestamp did not follow the `YYYY-MM-DDTHH:MMZ` format.
    #[error("invalid timestamp '{0}', expected YYYY-MM-DDTHH:MMZ (e.g. 2025-01-06T12:30Z)")]
    InvalidTimestamp(String),

    /// The status value is not part of the task vocabulary.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The deadline horizon is negative.
    #[error("remaining_days must not be negative, got {0}")]
    NegativeRemainingDays(i64),

    /// The task identifier is not a positive integer.
    #[error("invalid task id {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// A batch operation received no identifiers.
    #[error("batch operations require at least one task id")]
    EmptyIdSet,
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
