//! Shared test helpers for in-memory repository integration tests.

use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use tasktrack::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, format_timestamp},
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Service type exercised by the in-memory suites.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Provides a service over a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Renders a due date `days` from now in the external layout.
#[must_use]
pub fn due_in(days: i64) -> String {
    format_timestamp(Utc::now() + TimeDelta::days(days))
}

/// Creates a task due `days` from now and returns its identifier.
///
/// # Errors
///
/// Returns an error if creation fails.
pub async fn create_due(
    service: &TestService,
    title: &str,
    days: i64,
) -> Result<TaskId, eyre::Report> {
    let task = service
        .create(CreateTaskRequest::new(title, due_in(days)))
        .await?;
    Ok(task.id())
}
