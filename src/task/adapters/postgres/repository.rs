//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        DueDate, NewTask, PageWindow, PersistedTaskData, Task, TaskFilter, TaskId, TaskIdSet,
        TaskPage, TaskPatch, TaskPredicate, TaskStatus, TaskTitle, TaskTransition,
    },
    ports::{DeletionScope, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL for the `tasks` table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2025-01-06-000000_create_tasks/up.sql");

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table and its indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when a connection cannot
    /// be acquired or the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await?;
        tracing::debug!("tasks schema is in place");
        Ok(())
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        scope: DeletionScope,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = lookup_query(id, scope)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_active(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let changeset = to_changeset(patch, timestamp);
        self.run_blocking(move |connection| {
            let row = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::deleted_at.is_null()),
            )
            .set(changeset)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn query(
        &self,
        filter: &TaskFilter,
        window: PageWindow,
    ) -> TaskRepositoryResult<TaskPage> {
        let owned_filter = filter.clone();
        let offset = i64::try_from(window.offset()).unwrap_or(i64::MAX);
        let limit = i64::from(window.limit());
        self.run_blocking(move |connection| {
            let (rows, total) = connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run(|transaction| {
                    let count = filtered_query(&owned_filter)
                        .count()
                        .get_result::<i64>(transaction)?;
                    let page_rows = filtered_query(&owned_filter)
                        .order(tasks::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(transaction)?;
                    Ok::<_, DieselError>((page_rows, count))
                })
                .map_err(TaskRepositoryError::persistence)?;
            let tasks = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            Ok(TaskPage {
                tasks,
                total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
                window,
            })
        })
        .await
    }

    async fn transition(
        &self,
        id: TaskId,
        transition: TaskTransition,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = connection
                .transaction(|transaction| {
                    let affected =
                        apply_transition(transaction, vec![id.value()], transition, timestamp)?;
                    if affected.is_empty() {
                        return Ok(None);
                    }
                    lookup_query(id, DeletionScope::IncludeDeleted)
                        .select(TaskRow::as_select())
                        .first::<TaskRow>(transaction)
                        .optional()
                })
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn batch_transition(
        &self,
        ids: &TaskIdSet,
        transition: TaskTransition,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        let values = ids.values();
        self.run_blocking(move |connection| {
            apply_transition(connection, values, transition, timestamp)
                .map(into_sorted_ids)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn hard_delete(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(removed).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn batch_hard_delete(&self, ids: &TaskIdSet) -> TaskRepositoryResult<Vec<TaskId>> {
        let values = ids.values();
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq_any(values)))
                .returning(tasks::id)
                .get_results::<i64>(connection)
                .map(into_sorted_ids)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Builds the lookup for a single record within a deletion scope.
pub(super) fn lookup_query(id: TaskId, scope: DeletionScope) -> tasks::BoxedQuery<'static, Pg> {
    let query: tasks::BoxedQuery<'static, Pg> =
        tasks::table.filter(tasks::id.eq(id.value())).into_boxed();
    match scope {
        DeletionScope::ActiveOnly => query.filter(tasks::deleted_at.is_null()),
        DeletionScope::IncludeDeleted => query,
    }
}

/// Translates a domain filter into a boxed query over active rows.
pub(super) fn filtered_query(filter: &TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let active: tasks::BoxedQuery<'static, Pg> =
        tasks::table.filter(tasks::deleted_at.is_null()).into_boxed();
    filter
        .predicates()
        .iter()
        .fold(active, |query, predicate| match predicate {
            TaskPredicate::TitleContains(needle) => {
                query.filter(tasks::title.ilike(contains_pattern(needle)))
            }
            TaskPredicate::CategoryEquals(category) => {
                query.filter(tasks::category.eq(category.clone()))
            }
            TaskPredicate::StatusEquals(status) => query.filter(tasks::status.eq(status.as_str())),
            TaskPredicate::ColorEquals(color) => query.filter(tasks::color.eq(color.clone())),
            TaskPredicate::DueOnOrBefore(cutoff) => query.filter(tasks::due_date.le(*cutoff)),
        })
}

/// Wraps `needle` for a `LIKE` substring match, escaping wildcards.
pub(super) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Runs the conditional `UPDATE … RETURNING id` for a transition.
fn apply_transition(
    connection: &mut PgConnection,
    ids: Vec<i64>,
    transition: TaskTransition,
    timestamp: DateTime<Utc>,
) -> QueryResult<Vec<i64>> {
    let targets = tasks::table.filter(tasks::id.eq_any(ids));
    match transition {
        TaskTransition::Complete => diesel::update(
            targets
                .filter(tasks::deleted_at.is_null())
                .filter(tasks::status.eq(TaskStatus::Pending.as_str())),
        )
        .set((
            tasks::status.eq(TaskStatus::Completed.as_str()),
            tasks::updated_at.eq(timestamp),
        ))
        .returning(tasks::id)
        .get_results(connection),
        TaskTransition::SoftDelete => diesel::update(targets.filter(tasks::deleted_at.is_null()))
            .set((
                tasks::deleted_at.eq(Some(timestamp)),
                tasks::updated_at.eq(timestamp),
            ))
            .returning(tasks::id)
            .get_results(connection),
        TaskTransition::Restore => {
            diesel::update(targets.filter(tasks::deleted_at.is_not_null()))
                .set((
                    tasks::deleted_at.eq(None::<DateTime<Utc>>),
                    tasks::updated_at.eq(timestamp),
                ))
                .returning(tasks::id)
                .get_results(connection)
        }
    }
}

fn into_sorted_ids(mut values: Vec<i64>) -> Vec<TaskId> {
    values.sort_unstable();
    values.into_iter().map(TaskId::from_persisted).collect()
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        category: task.category().map(str::to_owned),
        color: task.color().map(str::to_owned),
        due_date: task.due_date().as_datetime(),
    }
}

fn to_changeset(patch: &TaskPatch, timestamp: DateTime<Utc>) -> TaskChangeset {
    TaskChangeset {
        title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
        description: patch.description.clone(),
        category: patch.category.clone(),
        color: patch.color.clone(),
        due_date: patch.due_date.map(DueDate::as_datetime),
        updated_at: timestamp,
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        category,
        color,
        due_date,
        status: persisted_status,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_persisted(id),
        title,
        description,
        category,
        color,
        due_date: DueDate::from_datetime(due_date),
        status,
        created_at,
        updated_at,
        deleted_at,
    }))
}
