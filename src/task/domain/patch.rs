//! Partial update payload for task records.

use super::{DueDate, Task, TaskTitle};
use chrono::{DateTime, Utc};

/// Field-by-field patch applied by the update operation.
///
/// `None` leaves the stored value unchanged. `Some` replaces it, including an
/// explicit empty string for the free-text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement category label.
    pub category: Option<String>,
    /// Replacement color tag.
    pub color: Option<String>,
    /// Replacement due date.
    pub due_date: Option<DueDate>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.color.is_none()
            && self.due_date.is_none()
    }

    /// Writes the present fields into `task` and stamps `updated_at`.
    pub fn apply_to(&self, task: &mut Task, timestamp: DateTime<Utc>) {
        if let Some(title) = &self.title {
            task.set_title(title.clone());
        }
        if let Some(description) = &self.description {
            task.set_description(Some(description.clone()));
        }
        if let Some(category) = &self.category {
            task.set_category(Some(category.clone()));
        }
        if let Some(color) = &self.color {
            task.set_color(Some(color.clone()));
        }
        if let Some(due_date) = self.due_date {
            task.set_due_date(due_date);
        }
        task.touch(timestamp);
    }
}
