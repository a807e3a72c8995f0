//! Repository port for task persistence, filtered lookup, and conditional
//! mutation.

use crate::task::domain::{
    NewTask, PageWindow, Task, TaskFilter, TaskId, TaskIdSet, TaskPage, TaskPatch,
    TaskTransition,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Which records a lookup may resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletionScope {
    /// Only records whose `deleted_at` is unset.
    #[default]
    ActiveOnly,
    /// Active and soft-deleted records alike.
    IncludeDeleted,
}

/// Task persistence contract.
///
/// Every mutating method is a single atomic statement: preconditions are
/// evaluated together with the write, never in a separate round trip.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task, assigning its identifier, timestamps, and default
    /// status.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier within the given scope.
    ///
    /// Returns `None` when no record matches.
    async fn find_by_id(&self, id: TaskId, scope: DeletionScope)
    -> TaskRepositoryResult<Option<Task>>;

    /// Applies `patch` to the task when it exists and is active.
    ///
    /// Returns the updated record, or `None` when no active record matches.
    async fn update_active(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one page of active tasks matching `filter`, in ascending
    /// identifier order, with the unpaginated match count.
    async fn query(&self, filter: &TaskFilter, window: PageWindow)
    -> TaskRepositoryResult<TaskPage>;

    /// Applies `transition` to the task if it currently satisfies the
    /// transition precondition.
    ///
    /// Returns the updated record, or `None` when no row matched the
    /// identifier and precondition together.
    async fn transition(
        &self,
        id: TaskId,
        transition: TaskTransition,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Applies `transition` to every listed task that satisfies the
    /// precondition, in one statement.
    ///
    /// Returns the affected identifiers in ascending order.
    async fn batch_transition(
        &self,
        ids: &TaskIdSet,
        transition: TaskTransition,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<TaskId>>;

    /// Permanently removes the task regardless of deletion state.
    ///
    /// Returns the number of removed rows (zero or one).
    async fn hard_delete(&self, id: TaskId) -> TaskRepositoryResult<u64>;

    /// Permanently removes every listed task that exists.
    ///
    /// Returns the removed identifiers in ascending order.
    async fn batch_hard_delete(&self, ids: &TaskIdSet) -> TaskRepositoryResult<Vec<TaskId>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
