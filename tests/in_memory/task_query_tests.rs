//! In-memory integration tests for filtered, paginated listing.

use super::helpers::{TestService, create_due, service};
use rstest::rstest;
use tasktrack::task::domain::{TaskId, TaskQuery, TaskStatus};

fn ids_of(page: &tasktrack::task::domain::TaskPage) -> Vec<TaskId> {
    page.tasks.iter().map(tasktrack::task::domain::Task::id).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remaining_days_limits_to_horizon(service: TestService) -> eyre::Result<()> {
    let one = create_due(&service, "one day", 1).await?;
    let five = create_due(&service, "five days", 5).await?;
    create_due(&service, "ten days", 10).await?;

    let page = service
        .list(&TaskQuery {
            remaining_days: Some(5),
            ..TaskQuery::default()
        })
        .await?;

    eyre::ensure!(ids_of(&page) == vec![one, five], "unexpected horizon match");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_tasks_match_zero_horizon(service: TestService) -> eyre::Result<()> {
    let overdue = create_due(&service, "overdue", -2).await?;
    create_due(&service, "upcoming", 2).await?;

    let page = service
        .list(&TaskQuery {
            remaining_days: Some(0),
            ..TaskQuery::default()
        })
        .await?;

    eyre::ensure!(ids_of(&page) == vec![overdue], "zero horizon mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_page_holds_rows_eleven_to_twenty(service: TestService) -> eyre::Result<()> {
    let mut created = Vec::new();
    for index in 1..=25 {
        created.push(create_due(&service, &format!("task {index}"), 2).await?);
    }

    let page = service
        .list(&TaskQuery {
            page: Some(2),
            limit: Some(10),
            ..TaskQuery::default()
        })
        .await?;

    let expected: Vec<TaskId> = created.iter().copied().skip(10).take(10).collect();
    eyre::ensure!(ids_of(&page) == expected, "page two mismatch");
    eyre::ensure!(page.total == 25, "total was {}", page.total);
    eyre::ensure!(page.total_pages() == 3, "total pages mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn page_past_the_end_is_empty_but_counts(service: TestService) -> eyre::Result<()> {
    create_due(&service, "only", 1).await?;

    let page = service
        .list(&TaskQuery {
            page: Some(5),
            ..TaskQuery::default()
        })
        .await?;

    eyre::ensure!(page.tasks.is_empty(), "expected empty page");
    eyre::ensure!(page.total == 1, "total should ignore the window");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_filter_excludes_soft_deleted(service: TestService) -> eyre::Result<()> {
    let kept = create_due(&service, "kept", 1).await?;
    let removed = create_due(&service, "removed", 1).await?;
    service.batch_complete(vec![kept.value(), removed.value()]).await?;
    service.soft_delete(removed).await?;

    let page = service
        .list(&TaskQuery {
            status: Some(TaskStatus::Completed),
            ..TaskQuery::default()
        })
        .await?;

    eyre::ensure!(ids_of(&page) == vec![kept], "deleted task leaked into list");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn page_far_past_the_end_is_empty(service: TestService) -> eyre::Result<()> {
    create_due(&service, "only", 2).await?;
    let max = i64::from(u32::MAX);

    let page = service
        .list(&TaskQuery {
            page: Some(max),
            limit: Some(max),
            ..TaskQuery::default()
        })
        .await?;

    eyre::ensure!(page.tasks.is_empty(), "expected an empty page");
    eyre::ensure!(page.total == 1, "total {}", page.total);
    eyre::ensure!(page.total_pages() == 1, "pages {}", page.total_pages());
    Ok(())
}
