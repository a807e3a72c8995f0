//! Query-shape and row-mapping tests that need no running database.

use super::models::TaskRow;
use super::repository::{contains_pattern, filtered_query, lookup_query, row_to_task};
use crate::task::domain::{
    TaskDomainError, TaskFilter, TaskId, TaskPredicate, TaskQuery, TaskStatus,
};
use crate::task::ports::{DeletionScope, TaskRepositoryError};
use chrono::{TimeZone, Utc};
use diesel::debug_query;
use diesel::pg::Pg;
use rstest::rstest;

fn sql_for(filter: &TaskFilter) -> String {
    debug_query::<Pg, _>(&filtered_query(filter)).to_string()
}

fn sample_row() -> TaskRow {
    let timestamp = Utc
        .with_ymd_and_hms(2025, 1, 6, 12, 30, 0)
        .single()
        .expect("valid timestamp");
    TaskRow {
        id: 7,
        title: "Write report".to_owned(),
        description: Some("Quarterly numbers".to_owned()),
        category: Some("work".to_owned()),
        color: Some("#FF0000".to_owned()),
        due_date: timestamp,
        status: "pending".to_owned(),
        created_at: timestamp,
        updated_at: timestamp,
        deleted_at: None,
    }
}

#[rstest]
fn unfiltered_query_only_excludes_soft_deleted_rows() {
    let sql = sql_for(&TaskFilter::default());

    assert!(sql.contains(r#""tasks"."deleted_at" IS NULL"#), "{sql}");
    assert!(!sql.contains("ILIKE"), "{sql}");
}

#[rstest]
fn every_predicate_is_conjoined() {
    let now = Utc::now();
    let composed = TaskQuery {
        keywords: Some("report".to_owned()),
        category: Some("work".to_owned()),
        status: Some(TaskStatus::Pending),
        color: Some("#FF0000".to_owned()),
        remaining_days: Some(3),
        ..TaskQuery::default()
    }
    .compose(now)
    .expect("query composes");

    let sql = sql_for(&composed.filter);

    assert!(sql.contains(r#""tasks"."title" ILIKE"#), "{sql}");
    assert!(sql.contains(r#""tasks"."category" ="#), "{sql}");
    assert!(sql.contains(r#""tasks"."status" ="#), "{sql}");
    assert!(sql.contains(r#""tasks"."color" ="#), "{sql}");
    assert!(sql.contains(r#""tasks"."due_date" <="#), "{sql}");
    assert!(sql.contains("%report%"), "{sql}");
    assert!(!sql.contains(" OR "), "{sql}");
}

#[rstest]
fn status_predicate_binds_storage_representation() {
    let filter = TaskFilter::new(vec![TaskPredicate::StatusEquals(TaskStatus::Completed)]);
    let sql = sql_for(&filter);
    assert!(sql.contains("\"completed\""), "{sql}");
}

#[rstest]
#[case(DeletionScope::ActiveOnly, true)]
#[case(DeletionScope::IncludeDeleted, false)]
fn lookup_scope_controls_deleted_filter(#[case] scope: DeletionScope, #[case] scoped: bool) {
    let id = TaskId::new(42).expect("valid id");
    let sql = debug_query::<Pg, _>(&lookup_query(id, scope)).to_string();

    assert!(sql.contains(r#""tasks"."id" = $1"#), "{sql}");
    assert_eq!(sql.contains(r#""tasks"."deleted_at" IS NULL"#), scoped, "{sql}");
}

#[rstest]
#[case("report", "%report%")]
#[case("50%", "%50\\%%")]
#[case("snake_case", "%snake\\_case%")]
#[case("back\\slash", "%back\\\\slash%")]
fn contains_pattern_escapes_like_wildcards(#[case] needle: &str, #[case] expected: &str) {
    assert_eq!(contains_pattern(needle), expected);
}

#[rstest]
fn row_to_task_maps_every_column() {
    let task = row_to_task(sample_row()).expect("row converts");

    assert_eq!(task.id().value(), 7);
    assert_eq!(task.title().as_str(), "Write report");
    assert_eq!(task.description(), Some("Quarterly numbers"));
    assert_eq!(task.category(), Some("work"));
    assert_eq!(task.color(), Some("#FF0000"));
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.due_date().to_string(), "2025-01-06T12:30Z");
    assert!(task.is_active());
}

#[rstest]
fn row_to_task_rejects_unknown_status() {
    let row = TaskRow {
        status: "archived".to_owned(),
        ..sample_row()
    };
    let result = row_to_task(row);
    assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
}

#[rstest]
fn row_to_task_rejects_blank_title() {
    let row = TaskRow {
        title: "   ".to_owned(),
        ..sample_row()
    };
    let Err(TaskRepositoryError::Persistence(source)) = row_to_task(row) else {
        panic!("blank persisted title should fail conversion");
    };
    assert_eq!(source.to_string(), TaskDomainError::EmptyTitle.to_string());
}
