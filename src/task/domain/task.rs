//! Task record, creation draft, and status vocabulary.

use super::{DueDate, ParseTaskStatusError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is still open.
    #[default]
    Pending,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated field values for a task that has not been stored yet.
///
/// Storage assigns the identifier, timestamps, and the default
/// [`TaskStatus::Pending`] status on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    category: Option<String>,
    color: Option<String>,
    due_date: DueDate,
}

impl NewTask {
    /// Creates a draft with the required fields.
    #[must_use]
    pub const fn new(title: TaskTitle, due_date: DueDate) -> Self {
        Self {
            title,
            description: None,
            category: None,
            color: None,
            due_date,
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

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the color tag, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DueDate {
        self.due_date
    }

    /// Materializes the stored record once storage has assigned identity.
    #[must_use]
    pub fn into_persisted(self, id: TaskId, timestamp: DateTime<Utc>) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            color: self.color,
            due_date: self.due_date,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }
}

/// Stored task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    category: Option<String>,
    color: Option<String>,
    due_date: DueDate,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted category label.
    pub category: Option<String>,
    /// Persisted color tag.
    pub color: Option<String>,
    /// Persisted due date.
    pub due_date: DueDate,
    /// Persisted completion status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp; `None` while the task is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            color: data.color,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the color tag, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DueDate {
        self.due_date
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp, if the task is soft-deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` while the task has not been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }

    pub(crate) fn set_title(&mut self, title: TaskTitle) {
        self.title = title;
    }

    pub(crate) fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub(crate) fn set_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    pub(crate) fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub(crate) fn set_due_date(&mut self, due_date: DueDate) {
        self.due_date = due_date;
    }

    pub(crate) fn touch(&mut self, timestamp: DateTime<Utc>) {
        self.updated_at = timestamp;
    }
}
