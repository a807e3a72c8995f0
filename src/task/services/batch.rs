//! Batch transitions and batch hard deletion.

use super::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TaskOperation};
use crate::task::{
    domain::{TaskId, TaskIdSet, TaskTransition},
    ports::TaskRepository,
};
use mockable::Clock;
use std::collections::BTreeSet;

/// Result of a batch operation.
///
/// Identifiers that did not satisfy the precondition (or did not exist) are
/// excluded from `affected` without raising an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// De-duplicated identifiers the caller asked for.
    pub requested: TaskIdSet,
    /// Identifiers actually changed, in ascending order.
    pub affected: Vec<TaskId>,
}

impl BatchOutcome {
    /// Returns requested identifiers that were left untouched.
    #[must_use]
    pub fn skipped(&self) -> Vec<TaskId> {
        let affected: BTreeSet<TaskId> = self.affected.iter().copied().collect();
        self.requested
            .iter()
            .filter(|id| !affected.contains(id))
            .collect()
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Completes every listed task that is active and pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for an empty or invalid
    /// identifier list, or [`TaskLifecycleError::Storage`].
    pub async fn batch_complete(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> TaskLifecycleResult<BatchOutcome> {
        self.batch_transition(ids, TaskTransition::Complete, TaskOperation::BatchComplete)
            .await
    }

    /// Soft-deletes every listed task that is active.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for an empty or invalid
    /// identifier list, or [`TaskLifecycleError::Storage`].
    pub async fn batch_soft_delete(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> TaskLifecycleResult<BatchOutcome> {
        self.batch_transition(
            ids,
            TaskTransition::SoftDelete,
            TaskOperation::BatchSoftDelete,
        )
        .await
    }

    /// Restores every listed task that is soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for an empty or invalid
    /// identifier list, or [`TaskLifecycleError::Storage`].
    pub async fn batch_restore(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> TaskLifecycleResult<BatchOutcome> {
        self.batch_transition(ids, TaskTransition::Restore, TaskOperation::BatchRestore)
            .await
    }

    /// Permanently removes every listed task that exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for an empty or invalid
    /// identifier list, or [`TaskLifecycleError::Storage`].
    pub async fn batch_hard_delete(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> TaskLifecycleResult<BatchOutcome> {
        let requested = TaskIdSet::new(ids)?;
        let affected = self
            .repository
            .batch_hard_delete(&requested)
            .await
            .map_err(TaskLifecycleError::storage(
                TaskOperation::BatchHardDelete,
                &requested,
            ))?;
        tracing::info!(
            requested = requested.len(),
            affected = affected.len(),
            "tasks permanently deleted"
        );
        Ok(BatchOutcome {
            requested,
            affected,
        })
    }

    async fn batch_transition(
        &self,
        ids: impl IntoIterator<Item = i64>,
        transition: TaskTransition,
        operation: TaskOperation,
    ) -> TaskLifecycleResult<BatchOutcome> {
        let requested = TaskIdSet::new(ids)?;
        let affected = self
            .repository
            .batch_transition(&requested, transition, self.clock.utc())
            .await
            .map_err(TaskLifecycleError::storage(operation, &requested))?;
        tracing::info!(
            %operation,
            requested = requested.len(),
            affected = affected.len(),
            "batch transition applied"
        );
        Ok(BatchOutcome {
            requested,
            affected,
        })
    }
}
