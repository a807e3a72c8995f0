//! In-memory integration tests for single-record lifecycle operations.

use super::helpers::{TestService, create_due, due_in, service};
use rstest::rstest;
use tasktrack::task::{
    domain::TaskStatus,
    mapping::TaskView,
    ports::DeletionScope,
    services::{CreateTaskRequest, TaskErrorKind, TaskLifecycleError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_walks_the_state_machine(service: TestService) -> eyre::Result<()> {
    let id = create_due(&service, "Ship release", 3).await?;

    let updated = service
        .update(UpdateTaskRequest::new(id).with_color("#00AA00"))
        .await?;
    eyre::ensure!(updated.color() == Some("#00AA00"), "color not updated");

    let completed = service.complete(id).await?;
    eyre::ensure!(
        completed.status() == TaskStatus::Completed,
        "task not completed"
    );

    service.soft_delete(id).await?;
    let hidden = service.get(id, DeletionScope::ActiveOnly).await;
    eyre::ensure!(
        hidden.as_ref().err().map(TaskLifecycleError::kind) == Some(TaskErrorKind::NotFound),
        "soft-deleted task still visible"
    );

    let restored = service.restore(id).await?;
    eyre::ensure!(restored.is_active(), "task not restored");
    eyre::ensure!(
        restored.status() == TaskStatus::Completed,
        "restore changed status"
    );

    service.hard_delete(id).await?;
    let gone = service.get(id, DeletionScope::IncludeDeleted).await;
    eyre::ensure!(
        gone.as_ref().err().map(TaskLifecycleError::kind) == Some(TaskErrorKind::NotFound),
        "hard-deleted task still stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn external_view_round_trips_due_date(service: TestService) -> eyre::Result<()> {
    let due = due_in(4);
    let created = service
        .create(CreateTaskRequest::new("Round trip", due.clone()))
        .await?;

    let fetched = service
        .get(created.id(), DeletionScope::ActiveOnly)
        .await?;
    let view = TaskView::from(&fetched);

    eyre::ensure!(view.due_date == due, "due date changed in transit");
    let reparsed = tasktrack::task::domain::DueDate::parse(&view.due_date)?;
    eyre::ensure!(reparsed == created.due_date(), "round trip lost precision");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_twice_leaves_state_unchanged(service: TestService) -> eyre::Result<()> {
    let id = create_due(&service, "Once only", 1).await?;
    let first = service.complete(id).await?;

    let second = service.complete(id).await;
    eyre::ensure!(
        second.as_ref().err().map(TaskLifecycleError::kind) == Some(TaskErrorKind::PreconditionFailed),
        "second completion should be rejected"
    );

    let stored = service.get(id, DeletionScope::ActiveOnly).await?;
    eyre::ensure!(stored == first, "failed completion mutated the task");
    Ok(())
}
