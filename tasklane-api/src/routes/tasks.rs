/// Task lifecycle endpoints
///
/// All task endpoints require a valid access token. The creator of a task is
/// always the authenticated caller; it cannot be supplied in the body.
///
/// # Endpoints
///
/// - `GET /api/tasks` - List tasks (paginated)
/// - `POST /api/tasks` - Create task
/// - `GET /api/tasks/:id` - Get task with creator and assignee
/// - `PUT /api/tasks/:id` - Update task
/// - `DELETE /api/tasks/:id` - Soft-delete task

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use tasklane_shared::{
    auth::middleware::AuthContext,
    models::{
        response::ApiResponse,
        task::{NewTask, TaskDetail, TaskPage, UpdateTask},
    },
    service::tasks::DEFAULT_PAGE_SIZE,
};

/// Pagination parameters for task listings
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,

    /// Page size, 1 to 100 (default: 10)
    pub limit: Option<i64>,
}

/// List tasks handler
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks?page=1&limit=10
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "tasks": [ { "id": 1, "title": "...", "creator": {...}, ... } ],
///     "total": 42,
///     "page": 1,
///     "limit": 10
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Page below 1 or limit outside 1..=100
/// - `401 Unauthorized`: Missing or invalid token
pub async fn list_tasks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTasksQuery>,
) -> ApiResult<Json<ApiResponse<TaskPage>>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    let tasks = state.tasks.list(page, limit).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// Create task handler
///
/// New tasks always start as `pending` regardless of the request body;
/// priority defaults to `medium` when omitted.
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Ship the release",
///   "description": "Cut and publish v1.2",
///   "priority": "high",
///   "assignee_id": 2,
///   "due_date": "2025-06-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blank title
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Assignee does not exist
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(input): ApiJson<NewTask>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TaskDetail>>)> {
    let task = state.tasks.create(input, auth.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "Task created successfully",
            task,
        )),
    ))
}

/// Get task handler
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Unknown or soft-deleted task
pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<TaskDetail>>> {
    let task = state.tasks.get(id).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// Update task handler
///
/// Accepts a partial body: absent fields keep their values, and nullable
/// fields (description, assignee, due date) clear on an explicit `null`.
///
/// # Endpoint
///
/// ```text
/// PUT /api/tasks/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "status": "completed",
///   "assignee_id": null
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blank title or unknown status/priority value
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Unknown task or unknown assignee
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<UpdateTask>,
) -> ApiResult<Json<ApiResponse<TaskDetail>>> {
    let task = state.tasks.update(id, patch).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Task updated successfully",
        task,
    )))
}

/// Delete task handler
///
/// Soft-deletes: the row is tombstoned and disappears from every read path
/// and from the metrics. Deleting twice reports not found.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Unknown or already-deleted task
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.tasks.delete(id).await?;
    Ok(Json(ApiResponse::message_only("Task deleted successfully")))
}
