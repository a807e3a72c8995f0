//! Service layer for single-record task lifecycle operations.

use super::{TaskLifecycleError, TaskLifecycleResult, TaskOperation};
use crate::task::{
    domain::{
        DueDate, NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskTitle, TaskTransition,
        check_category, check_color,
    },
    ports::{DeletionScope, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    due_date: String,
    description: Option<String>,
    category: Option<String>,
    color: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    ///
    /// `due_date` uses the `YYYY-MM-DDTHH:MMZ` layout.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.into(),
            description: None,
            category: None,
            color: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the color tag.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let title = TaskTitle::new(&self.title)?;
        let due_date = DueDate::parse(&self.due_date)?;
        if let Some(category) = &self.category {
            check_category(category)?;
        }
        if let Some(color) = &self.color {
            check_color(color)?;
        }
        let mut task = NewTask::new(title, due_date);
        if let Some(description) = self.description {
            task = task.with_description(description);
        }
        if let Some(category) = self.category {
            task = task.with_category(category);
        }
        if let Some(color) = self.color {
            task = task.with_color(color);
        }
        Ok(task)
    }
}

/// Request payload for partially updating a task.
///
/// Unset fields leave the stored value unchanged. A blank title or due date
/// counts as unset; the free-text fields accept an empty string as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    color: Option<String>,
    due_date: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch request for the task.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            category: None,
            color: None,
            due_date: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replaces the color tag.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Replaces the due date (`YYYY-MM-DDTHH:MMZ`).
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Returns the targeted task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        if let Some(category) = &self.category {
            check_category(category)?;
        }
        if let Some(color) = &self.color {
            check_color(color)?;
        }
        Ok(TaskPatch {
            title: non_blank(self.title.as_deref())
                .map(TaskTitle::new)
                .transpose()?,
            description: self.description,
            category: self.category,
            color: self.color,
            due_date: non_blank(self.due_date.as_deref())
                .map(DueDate::parse)
                .transpose()?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Task lifecycle orchestration service.
///
/// Owns every state transition of a task record. Preconditions are never
/// checked in a separate read: each mutation is delegated to the repository
/// as one conditional statement and a miss is classified afterwards.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    pub(super) clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a blank title or a
    /// malformed due date (no storage access happens in that case) and
    /// [`TaskLifecycleError::Storage`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let new_task = request.into_new_task()?;
        let task = self
            .repository
            .insert(&new_task)
            .await
            .map_err(TaskLifecycleError::storage(TaskOperation::Create, "new"))?;
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// within `scope`, or [`TaskLifecycleError::Storage`] when lookup fails.
    pub async fn get(&self, id: TaskId, scope: DeletionScope) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id, scope)
            .await
            .map_err(TaskLifecycleError::storage(TaskOperation::Get, id))?
            .ok_or(TaskLifecycleError::NotFound {
                id,
                operation: TaskOperation::Get,
            })
    }

    /// Applies a partial update to an active task.
    ///
    /// Soft-deleted tasks are not updatable; restore them first. An update
    /// that sets no fields returns the current record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a blank title or a
    /// malformed due date, [`TaskLifecycleError::NotFound`] when no active
    /// task has the identifier, or [`TaskLifecycleError::Storage`].
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let id = request.id();
        let patch = request.into_patch()?;
        if patch.is_empty() {
            tracing::debug!(task_id = %id, "empty update, returning current record");
            return self
                .get(id, DeletionScope::ActiveOnly)
                .await
                .map_err(|err| match err {
                    TaskLifecycleError::NotFound { id: missing, .. } => {
                        TaskLifecycleError::NotFound {
                            id: missing,
                            operation: TaskOperation::Update,
                        }
                    }
                    other => other,
                });
        }

        let task = self
            .repository
            .update_active(id, &patch, self.clock.utc())
            .await
            .map_err(TaskLifecycleError::storage(TaskOperation::Update, id))?
            .ok_or(TaskLifecycleError::NotFound {
                id,
                operation: TaskOperation::Update,
            })?;
        tracing::info!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Marks a pending, active task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::PreconditionFailed`] when the task is
    /// already completed, soft-deleted, or missing, or
    /// [`TaskLifecycleError::Storage`].
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let updated = self
            .apply_transition(id, TaskTransition::Complete, TaskOperation::Complete)
            .await?;
        updated.ok_or_else(|| {
            tracing::warn!(task_id = %id, "complete rejected");
            TaskLifecycleError::PreconditionFailed {
                id,
                operation: TaskOperation::Complete,
                reason: "task is already completed or missing",
            }
        })
    }

    /// Soft-deletes an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or is already soft-deleted, or [`TaskLifecycleError::Storage`].
    pub async fn soft_delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let updated = self
            .apply_transition(id, TaskTransition::SoftDelete, TaskOperation::SoftDelete)
            .await?;
        if updated.is_none() {
            tracing::warn!(task_id = %id, "soft delete rejected");
            return Err(TaskLifecycleError::NotFound {
                id,
                operation: TaskOperation::SoftDelete,
            });
        }
        Ok(())
    }

    /// Restores a soft-deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, [`TaskLifecycleError::PreconditionFailed`] when it is not
    /// soft-deleted, or [`TaskLifecycleError::Storage`].
    pub async fn restore(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let updated = self
            .apply_transition(id, TaskTransition::Restore, TaskOperation::Restore)
            .await?;
        if let Some(task) = updated {
            return Ok(task);
        }

        // The conditional update already decided the outcome; this read only
        // chooses which failure to report.
        let existing = self
            .repository
            .find_by_id(id, DeletionScope::IncludeDeleted)
            .await
            .map_err(TaskLifecycleError::storage(TaskOperation::Restore, id))?;
        tracing::warn!(task_id = %id, exists = existing.is_some(), "restore rejected");
        Err(match existing {
            Some(_) => TaskLifecycleError::PreconditionFailed {
                id,
                operation: TaskOperation::Restore,
                reason: "task is not soft-deleted",
            },
            None => TaskLifecycleError::NotFound {
                id,
                operation: TaskOperation::Restore,
            },
        })
    }

    /// Permanently removes a task regardless of its deletion state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::Storage`].
    pub async fn hard_delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let removed = self
            .repository
            .hard_delete(id)
            .await
            .map_err(TaskLifecycleError::storage(TaskOperation::HardDelete, id))?;
        if removed == 0 {
            return Err(TaskLifecycleError::NotFound {
                id,
                operation: TaskOperation::HardDelete,
            });
        }
        tracing::info!(task_id = %id, "task permanently deleted");
        Ok(())
    }

    async fn apply_transition(
        &self,
        id: TaskId,
        transition: TaskTransition,
        operation: TaskOperation,
    ) -> TaskLifecycleResult<Option<Task>> {
        let updated = self
            .repository
            .transition(id, transition, self.clock.utc())
            .await
            .map_err(TaskLifecycleError::storage(operation, id))?;
        if updated.is_some() {
            tracing::info!(task_id = %id, %transition, "task transitioned");
        }
        Ok(updated)
    }
}
