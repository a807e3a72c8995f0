//! Service-level error taxonomy for task operations.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use std::fmt;
use thiserror::Error;

/// Operation names attached to logs and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// Create a task.
    Create,
    /// Read one task.
    Get,
    /// List tasks with filters.
    List,
    /// Patch a task.
    Update,
    /// Mark a task completed.
    Complete,
    /// Soft-delete a task.
    SoftDelete,
    /// Restore a soft-deleted task.
    Restore,
    /// Permanently delete a task.
    HardDelete,
    /// Complete several tasks.
    BatchComplete,
    /// Soft-delete several tasks.
    BatchSoftDelete,
    /// Restore several tasks.
    BatchRestore,
    /// Permanently delete several tasks.
    BatchHardDelete,
}

impl TaskOperation {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Complete => "complete",
            Self::SoftDelete => "soft_delete",
            Self::Restore => "restore",
            Self::HardDelete => "hard_delete",
            Self::BatchComplete => "batch_complete",
            Self::BatchSoftDelete => "batch_soft_delete",
            Self::BatchRestore => "batch_restore",
            Self::BatchHardDelete => "batch_hard_delete",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error category with a stable numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// Malformed or missing input, rejected before storage access.
    Validation,
    /// The identifier does not resolve in the required state.
    NotFound,
    /// The record exists but is in the wrong state for the transition.
    PreconditionFailed,
    /// The storage layer failed.
    Storage,
}

impl TaskErrorKind {
    /// Returns the domain error code reported to clients.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Validation => 40_001,
            Self::NotFound => 40_401,
            Self::PreconditionFailed => 40_901,
            Self::Storage => 50_001,
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The task does not exist in the state the operation requires.
    #[error("task {id} not found for {operation}")]
    NotFound {
        /// Requested identifier.
        id: TaskId,
        /// Operation that failed.
        operation: TaskOperation,
    },

    /// The task exists but its state forbids the transition.
    #[error("cannot {operation} task {id}: {reason}")]
    PreconditionFailed {
        /// Requested identifier.
        id: TaskId,
        /// Operation that failed.
        operation: TaskOperation,
        /// Human-readable explanation.
        reason: &'static str,
    },

    /// Repository operation failed.
    #[error("{operation} failed for task(s) {target}: {source}")]
    Storage {
        /// Operation that failed.
        operation: TaskOperation,
        /// Identifier or identifier set the operation targeted.
        target: String,
        /// Underlying repository error.
        #[source]
        source: TaskRepositoryError,
    },
}

impl TaskLifecycleError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Validation(_) => TaskErrorKind::Validation,
            Self::NotFound { .. } => TaskErrorKind::NotFound,
            Self::PreconditionFailed { .. } => TaskErrorKind::PreconditionFailed,
            Self::Storage { .. } => TaskErrorKind::Storage,
        }
    }

    /// Returns the domain error code reported to clients.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.kind().code()
    }

    /// Returns a mapper wrapping repository failures with operation context.
    pub(crate) fn storage(
        operation: TaskOperation,
        target: impl fmt::Display,
    ) -> impl FnOnce(TaskRepositoryError) -> Self {
        let rendered = target.to_string();
        move |source| {
            tracing::error!(%operation, tasks = %rendered, error = %source, "task storage failure");
            Self::Storage {
                operation,
                target: rendered,
                source,
            }
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
