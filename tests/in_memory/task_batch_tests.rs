//! In-memory integration tests for batch operations.

use super::helpers::{TestService, create_due, service};
use rstest::rstest;
use tasktrack::task::{
    domain::TaskDomainError, ports::DeletionScope, services::TaskLifecycleError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_complete_reports_matched_subset(service: TestService) -> eyre::Result<()> {
    let a = create_due(&service, "a", 1).await?;
    let b = create_due(&service, "b", 1).await?;
    let c = create_due(&service, "c", 1).await?;
    service.complete(b).await?;

    let outcome = service
        .batch_complete(vec![a.value(), b.value(), c.value()])
        .await?;

    eyre::ensure!(outcome.affected == vec![a, c], "affected {:?}", outcome.affected);
    eyre::ensure!(outcome.skipped() == vec![b], "skipped mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_soft_delete_and_restore(service: TestService) -> eyre::Result<()> {
    let a = create_due(&service, "a", 1).await?;
    let b = create_due(&service, "b", 1).await?;

    let deleted = service.batch_soft_delete(vec![a.value(), b.value()]).await?;
    eyre::ensure!(deleted.affected == vec![a, b], "soft delete mismatch");

    let again = service.batch_soft_delete(vec![a.value()]).await?;
    eyre::ensure!(again.affected.is_empty(), "already deleted task affected");

    let restored = service.batch_restore(vec![b.value()]).await?;
    eyre::ensure!(restored.affected == vec![b], "restore mismatch");
    service.get(b, DeletionScope::ActiveOnly).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_hard_delete_ignores_unknown_ids(service: TestService) -> eyre::Result<()> {
    let a = create_due(&service, "a", 1).await?;

    let outcome = service.batch_hard_delete(vec![a.value(), 4242]).await?;

    eyre::ensure!(outcome.affected == vec![a], "hard delete mismatch");
    let page = service.list(&tasktrack::task::domain::TaskQuery::default()).await?;
    eyre::ensure!(page.total == 0, "task survived hard delete");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_batch_is_a_validation_error(service: TestService) -> eyre::Result<()> {
    let result = service.batch_restore(Vec::new()).await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Validation(TaskDomainError::EmptyIdSet))
        ),
        "empty batch should be rejected"
    );
    Ok(())
}
