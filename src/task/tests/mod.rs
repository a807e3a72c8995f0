//! Unit tests for the task lifecycle module.

mod query_tests;

use crate::task::domain::{
    DueDate, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle, format_timestamp,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Fixed instant used by tests that do not depend on the wall clock.
pub(super) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 12, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Renders a due date `days` from now in the external layout.
pub(super) fn due_in(days: i64) -> String {
    format_timestamp(Utc::now() + TimeDelta::days(days))
}

/// Builds a stored task without going through a repository.
pub(super) fn persisted_task(id: i64, status: TaskStatus, deleted: bool) -> Task {
    let timestamp = fixed_instant();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id).expect("valid id"),
        title: TaskTitle::new("Write report").expect("valid title"),
        description: Some("Quarterly numbers".to_owned()),
        category: Some("work".to_owned()),
        color: Some("#FF0000".to_owned()),
        due_date: DueDate::from_datetime(timestamp + TimeDelta::days(2)),
        status,
        created_at: timestamp,
        updated_at: timestamp,
        deleted_at: deleted.then_some(timestamp),
    })
}
