//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Storage-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional color tag.
    pub color: Option<String>,
    /// Task deadline.
    pub due_date: DateTime<Utc>,
    /// Completion status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
///
/// The identifier, timestamps, and status fall back to column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional color tag.
    pub color: Option<String>,
    /// Task deadline.
    pub due_date: DateTime<Utc>,
}

/// Partial update model; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement category label.
    pub category: Option<String>,
    /// Replacement color tag.
    pub color: Option<String>,
    /// Replacement deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}
