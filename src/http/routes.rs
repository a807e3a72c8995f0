//! Route table and handlers for the task API.

use super::envelope::{ApiError, ApiResponse, ApiResult};
use super::state::AppState;
use crate::task::{
    domain::{TaskId, TaskQuery},
    mapping::{
        BatchIdsBody, BatchOutcomeView, CreateTaskBody, ListTasksParams, TaskPageView, TaskView,
        UpdateTaskBody,
    },
    ports::{DeletionScope, TaskRepository},
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::{get, patch, post},
};
use mockable::Clock;
use tower_http::trace::TraceLayer;

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type IdPath = Result<Path<i64>, PathRejection>;

/// Builds the task API router.
///
/// Static `batch` segments take precedence over the `{id}` parameter, so
/// `/tasks/batch` never resolves as a task identifier.
#[must_use]
pub fn router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            post(create_task::<R, C>).get(list_tasks::<R, C>),
        )
        .route(
            "/tasks/batch",
            patch(batch_soft_delete::<R, C>).delete(batch_hard_delete::<R, C>),
        )
        .route("/tasks/batch/complete", patch(batch_complete::<R, C>))
        .route("/tasks/batch/restore", patch(batch_restore::<R, C>))
        .route(
            "/tasks/{id}",
            get(get_task::<R, C>)
                .put(update_task::<R, C>)
                .patch(soft_delete_task::<R, C>)
                .delete(hard_delete_task::<R, C>),
        )
        .route("/tasks/{id}/complete", patch(complete_task::<R, C>))
        .route("/tasks/{id}/restore", patch(restore_task::<R, C>))
        .fallback(|| async { ApiError::route_not_found() })
        .method_not_allowed_fallback(|| async { ApiError::method_not_allowed() })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn task_id(path: IdPath) -> Result<TaskId, ApiError> {
    let Path(raw) = path?;
    Ok(TaskId::new(raw)?)
}

fn batch_ids(body: JsonBody<BatchIdsBody>) -> Result<Vec<i64>, ApiError> {
    let Json(payload) = body?;
    Ok(payload.ids)
}

async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    body: JsonBody<CreateTaskBody>,
) -> ApiResult<TaskView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(payload) = body?;
    let task = state.service().create(payload.into()).await?;
    Ok(ApiResponse::created("task created", TaskView::from(&task)))
}

async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    params: Result<Query<ListTasksParams>, QueryRejection>,
) -> ApiResult<TaskPageView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(raw) = params?;
    let query = TaskQuery::try_from(raw)?;
    let page = state.service().list(&query).await?;
    Ok(ApiResponse::ok("tasks listed", TaskPageView::from(&page)))
}

async fn get_task<R, C>(State(state): State<AppState<R, C>>, path: IdPath) -> ApiResult<TaskView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(path)?;
    let task = state.service().get(id, DeletionScope::ActiveOnly).await?;
    Ok(ApiResponse::ok("task found", TaskView::from(&task)))
}

async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    path: IdPath,
    body: JsonBody<UpdateTaskBody>,
) -> ApiResult<TaskView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(path)?;
    let Json(payload) = body?;
    let task = state.service().update(payload.into_request(id)).await?;
    Ok(ApiResponse::ok("task updated", TaskView::from(&task)))
}

async fn soft_delete_task<R, C>(State(state): State<AppState<R, C>>, path: IdPath) -> ApiResult<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(path)?;
    state.service().soft_delete(id).await?;
    Ok(ApiResponse::message("task deleted"))
}

async fn hard_delete_task<R, C>(State(state): State<AppState<R, C>>, path: IdPath) -> ApiResult<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(path)?;
    state.service().hard_delete(id).await?;
    Ok(ApiResponse::message("task permanently deleted"))
}

async fn complete_task<R, C>(State(state): State<AppState<R, C>>, path: IdPath) -> ApiResult<TaskView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(path)?;
    let task = state.service().complete(id).await?;
    Ok(ApiResponse::ok("task completed", TaskView::from(&task)))
}

async fn restore_task<R, C>(State(state): State<AppState<R, C>>, path: IdPath) -> ApiResult<TaskView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(path)?;
    let task = state.service().restore(id).await?;
    Ok(ApiResponse::ok("task restored", TaskView::from(&task)))
}

async fn batch_complete<R, C>(
    State(state): State<AppState<R, C>>,
    body: JsonBody<BatchIdsBody>,
) -> ApiResult<BatchOutcomeView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let outcome = state.service().batch_complete(batch_ids(body)?).await?;
    Ok(ApiResponse::ok("tasks completed", BatchOutcomeView::from(&outcome)))
}

async fn batch_soft_delete<R, C>(
    State(state): State<AppState<R, C>>,
    body: JsonBody<BatchIdsBody>,
) -> ApiResult<BatchOutcomeView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let outcome = state.service().batch_soft_delete(batch_ids(body)?).await?;
    Ok(ApiResponse::ok("tasks deleted", BatchOutcomeView::from(&outcome)))
}

async fn batch_restore<R, C>(
    State(state): State<AppState<R, C>>,
    body: JsonBody<BatchIdsBody>,
) -> ApiResult<BatchOutcomeView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let outcome = state.service().batch_restore(batch_ids(body)?).await?;
    Ok(ApiResponse::ok("tasks restored", BatchOutcomeView::from(&outcome)))
}

async fn batch_hard_delete<R, C>(
    State(state): State<AppState<R, C>>,
    body: JsonBody<BatchIdsBody>,
) -> ApiResult<BatchOutcomeView>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let outcome = state.service().batch_hard_delete(batch_ids(body)?).await?;
    Ok(ApiResponse::ok(
        "tasks permanently deleted",
        BatchOutcomeView::from(&outcome),
    ))
}
