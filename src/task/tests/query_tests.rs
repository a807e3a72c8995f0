//! Filter composition and pagination arithmetic tests.

use super::{fixed_instant, persisted_task};
use crate::task::domain::{
    DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, DueDate, PageWindow, PersistedTaskData, Task,
    TaskDomainError, TaskFilter, TaskPredicate, TaskQuery, TaskStatus,
};
use chrono::{DateTime, TimeDelta, Utc};
use rstest::rstest;

fn task_due(id: i64, due: DateTime<Utc>) -> Task {
    let base = persisted_task(id, TaskStatus::Pending, false);
    Task::from_persisted(PersistedTaskData {
        id: base.id(),
        title: base.title().clone(),
        description: None,
        category: None,
        color: None,
        due_date: DueDate::from_datetime(due),
        status: base.status(),
        created_at: base.created_at(),
        updated_at: base.updated_at(),
        deleted_at: None,
    })
}

#[rstest]
fn empty_query_composes_to_defaults() {
    let composed = TaskQuery::default()
        .compose(fixed_instant())
        .expect("query composes");

    assert!(composed.filter.predicates().is_empty());
    assert_eq!(composed.window, PageWindow::default());
    assert_eq!(composed.window.page(), DEFAULT_PAGE);
    assert_eq!(composed.window.limit(), DEFAULT_PAGE_LIMIT);
}

#[rstest]
fn blank_text_parameters_add_no_predicates() {
    let query = TaskQuery {
        keywords: Some("   ".to_owned()),
        category: Some(String::new()),
        color: Some(" ".to_owned()),
        ..TaskQuery::default()
    };
    let composed = query.compose(fixed_instant()).expect("query composes");
    assert!(composed.filter.predicates().is_empty());
}

#[rstest]
fn present_parameters_compose_in_order() {
    let now = fixed_instant();
    let query = TaskQuery {
        keywords: Some(" report ".to_owned()),
        category: Some("work".to_owned()),
        status: Some(TaskStatus::Completed),
        color: Some("#00FF00".to_owned()),
        remaining_days: Some(3),
        ..TaskQuery::default()
    };

    let composed = query.compose(now).expect("query composes");

    assert_eq!(
        composed.filter.predicates(),
        &[
            TaskPredicate::TitleContains("report".to_owned()),
            TaskPredicate::CategoryEquals("work".to_owned()),
            TaskPredicate::StatusEquals(TaskStatus::Completed),
            TaskPredicate::ColorEquals("#00FF00".to_owned()),
            TaskPredicate::DueOnOrBefore(now + TimeDelta::days(3)),
        ]
    );
}

#[rstest]
fn zero_remaining_days_means_due_by_now() {
    let now = fixed_instant();
    let query = TaskQuery {
        remaining_days: Some(0),
        ..TaskQuery::default()
    };
    let composed = query.compose(now).expect("query composes");
    assert_eq!(
        composed.filter.predicates(),
        &[TaskPredicate::DueOnOrBefore(now)]
    );
}

#[rstest]
fn negative_remaining_days_is_rejected() {
    let query = TaskQuery {
        remaining_days: Some(-1),
        ..TaskQuery::default()
    };
    assert_eq!(
        query.compose(fixed_instant()),
        Err(TaskDomainError::NegativeRemainingDays(-1))
    );
}

#[rstest]
fn enormous_horizon_saturates() {
    let query = TaskQuery {
        remaining_days: Some(i64::MAX),
        ..TaskQuery::default()
    };
    let composed = query.compose(fixed_instant()).expect("query composes");
    assert_eq!(
        composed.filter.predicates(),
        &[TaskPredicate::DueOnOrBefore(DateTime::<Utc>::MAX_UTC)]
    );
}

#[rstest]
fn deadline_filter_keeps_tasks_within_horizon() {
    let now = fixed_instant();
    let tasks = [
        task_due(1, now + TimeDelta::days(1)),
        task_due(2, now + TimeDelta::days(5)),
        task_due(3, now + TimeDelta::days(10)),
    ];
    let query = TaskQuery {
        remaining_days: Some(5),
        ..TaskQuery::default()
    };
    let composed = query.compose(now).expect("query composes");

    let matched: Vec<i64> = tasks
        .iter()
        .filter(|task| composed.filter.matches(task))
        .map(|task| task.id().value())
        .collect();

    assert_eq!(matched, vec![1, 2]);
}

#[rstest]
#[case("report", true)]
#[case("REPORT", true)]
#[case("write rep", true)]
#[case("memo", false)]
fn title_match_ignores_case(#[case] needle: &str, #[case] expected: bool) {
    let task = persisted_task(1, TaskStatus::Pending, false);
    let predicate = TaskPredicate::TitleContains(needle.to_owned());
    assert_eq!(predicate.matches(&task), expected);
}

#[rstest]
fn filter_never_matches_soft_deleted_tasks() {
    let deleted = persisted_task(1, TaskStatus::Pending, true);
    assert!(!TaskFilter::default().matches(&deleted));
    assert!(TaskFilter::default().matches(&persisted_task(2, TaskStatus::Pending, false)));
}

#[rstest]
#[case(None, None, 1, 50)]
#[case(Some(0), Some(0), 1, 50)]
#[case(Some(-3), Some(-10), 1, 50)]
#[case(Some(2), Some(10), 2, 10)]
fn page_window_substitutes_defaults(
    #[case] page: Option<i64>,
    #[case] limit: Option<i64>,
    #[case] expected_page: u32,
    #[case] expected_limit: u32,
) {
    let window = PageWindow::new(page, limit);
    assert_eq!(window.page(), expected_page);
    assert_eq!(window.limit(), expected_limit);
}

#[rstest]
#[case(1, 10, 0)]
#[case(2, 10, 10)]
#[case(3, 25, 50)]
fn offset_skips_previous_pages(#[case] page: i64, #[case] limit: i64, #[case] offset: u64) {
    assert_eq!(PageWindow::new(Some(page), Some(limit)).offset(), offset);
}

#[rstest]
fn extreme_window_offset_fits_sql_bigint() {
    let max = i64::from(u32::MAX);
    let window = PageWindow::new(Some(max), Some(max));

    assert_eq!(window.page(), u32::MAX);
    assert_eq!(window.limit(), u32::MAX);
    assert_eq!(window.offset(), i64::MAX.unsigned_abs());
    assert!(i64::try_from(window.offset()).is_ok());
}

#[rstest]
#[case(0, 0)]
#[case(10, 1)]
#[case(25, 3)]
#[case(30, 3)]
fn total_pages_rounds_up(#[case] total: u64, #[case] pages: u64) {
    assert_eq!(PageWindow::new(Some(1), Some(10)).total_pages(total), pages);
}
