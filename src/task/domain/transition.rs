//! Precondition-gated lifecycle transitions.

use super::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use std::fmt;

/// A state change guarded by a precondition on the current record.
///
/// Storage adapters evaluate [`TaskTransition::is_permitted`] and
/// [`TaskTransition::apply`] as one atomic conditional update, so a
/// transition either matches and applies or leaves the record untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskTransition {
    /// `pending` and active to `completed`.
    Complete,
    /// Active to soft-deleted.
    SoftDelete,
    /// Soft-deleted to active.
    Restore,
}

impl TaskTransition {
    /// Returns the operation name used in logs and error context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::SoftDelete => "soft_delete",
            Self::Restore => "restore",
        }
    }

    /// Returns `true` when `task` satisfies the transition precondition.
    #[must_use]
    pub const fn is_permitted(self, task: &Task) -> bool {
        match self {
            Self::Complete => task.is_active() && matches!(task.status(), TaskStatus::Pending),
            Self::SoftDelete => task.is_active(),
            Self::Restore => !task.is_active(),
        }
    }

    /// Applies the state change, stamping `updated_at` with `timestamp`.
    ///
    /// Callers check [`TaskTransition::is_permitted`] first; this method does
    /// not re-validate.
    pub fn apply(self, task: &mut Task, timestamp: DateTime<Utc>) {
        match self {
            Self::Complete => task.set_status(TaskStatus::Completed),
            Self::SoftDelete => task.set_deleted_at(Some(timestamp)),
            Self::Restore => task.set_deleted_at(None),
        }
        task.touch(timestamp);
    }
}

impl fmt::Display for TaskTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
