//! External representation of tasks and decoding of inbound payloads.
//!
//! Every timestamp crosses this boundary in the `YYYY-MM-DDTHH:MMZ` layout.
//! Malformed inputs are rejected here, before any lifecycle logic runs.

use super::domain::{
    Task, TaskDomainError, TaskId, TaskPage, TaskQuery, TaskStatus, format_timestamp,
};
use super::services::{BatchOutcome, CreateTaskRequest, UpdateTaskRequest};
use serde::{Deserialize, Serialize};

/// Externally visible task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional color tag.
    pub color: Option<String>,
    /// Deadline.
    pub due_date: String,
    /// Completion status.
    pub status: TaskStatus,
    /// Creation time.
    pub created_at: String,
    /// Last modification time.
    pub updated_at: String,
    /// Soft-deletion time, absent for active tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            category: task.category().map(str::to_owned),
            color: task.color().map(str::to_owned),
            due_date: task.due_date().to_string(),
            status: task.status(),
            created_at: format_timestamp(task.created_at()),
            updated_at: format_timestamp(task.updated_at()),
            deleted_at: task.deleted_at().map(format_timestamp),
        }
    }
}

/// One page of tasks with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPageView {
    /// Tasks on the page.
    pub tasks: Vec<TaskView>,
    /// Matching tasks before pagination.
    pub total: u64,
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of pages the full result spans.
    pub total_pages: u64,
}

impl From<&TaskPage> for TaskPageView {
    fn from(page: &TaskPage) -> Self {
        Self {
            tasks: page.tasks.iter().map(TaskView::from).collect(),
            total: page.total,
            page: page.window.page(),
            limit: page.window.limit(),
            total_pages: page.total_pages(),
        }
    }
}

/// Inbound body for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskBody {
    /// Required title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional color tag.
    #[serde(default)]
    pub color: Option<String>,
    /// Required deadline.
    #[serde(default)]
    pub due_date: String,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = Self::new(body.title, body.due_date);
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(category) = body.category {
            request = request.with_category(category);
        }
        if let Some(color) = body.color {
            request = request.with_color(color);
        }
        request
    }
}

/// Inbound body for a partial update.
///
/// Status is not updatable; a `status` key in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Replacement color tag.
    #[serde(default)]
    pub color: Option<String>,
    /// Replacement deadline.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl UpdateTaskBody {
    /// Builds the service request for the task `id`.
    #[must_use]
    pub fn into_request(self, id: TaskId) -> UpdateTaskRequest {
        let mut request = UpdateTaskRequest::new(id);
        if let Some(title) = self.title {
            request = request.with_title(title);
        }
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(category) = self.category {
            request = request.with_category(category);
        }
        if let Some(color) = self.color {
            request = request.with_color(color);
        }
        if let Some(due_date) = self.due_date {
            request = request.with_due_date(due_date);
        }
        request
    }
}

/// Query-string parameters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksParams {
    /// Title substring.
    #[serde(default)]
    pub keywords: Option<String>,
    /// Exact category.
    #[serde(default)]
    pub category: Option<String>,
    /// Exact status, `pending` or `completed`.
    #[serde(default)]
    pub status: Option<String>,
    /// Exact color tag.
    #[serde(default)]
    pub color: Option<String>,
    /// Deadline horizon in days.
    #[serde(default)]
    pub remaining_days: Option<i64>,
    /// One-based page number.
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default)]
    pub limit: Option<i64>,
}

impl TryFrom<ListTasksParams> for TaskQuery {
    type Error = TaskDomainError;

    fn try_from(params: ListTasksParams) -> Result<Self, Self::Error> {
        let status = params
            .status
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(TaskStatus::try_from)
            .transpose()?;
        Ok(Self {
            keywords: params.keywords,
            category: params.category,
            status,
            color: params.color,
            remaining_days: params.remaining_days,
            page: params.page,
            limit: params.limit,
        })
    }
}

/// Inbound body for batch operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BatchIdsBody {
    /// Target identifiers; duplicates are collapsed.
    #[serde(default)]
    pub ids: Vec<i64>,
}

/// Outcome of a batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcomeView {
    /// Identifiers that were changed.
    pub affected: Vec<i64>,
    /// Requested identifiers left untouched.
    pub skipped: Vec<i64>,
}

impl From<&BatchOutcome> for BatchOutcomeView {
    fn from(outcome: &BatchOutcome) -> Self {
        Self {
            affected: outcome.affected.iter().copied().map(TaskId::value).collect(),
            skipped: outcome.skipped().into_iter().map(TaskId::value).collect(),
        }
    }
}
