/// User read endpoints
///
/// Users are created through registration; these endpoints only read them.
/// Password hashes and tombstones never serialize, so the records are safe
/// to return as-is.
///
/// # Endpoints
///
/// - `GET /api/users` - List users
/// - `GET /api/users/:id` - Get user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiPath,
};
use axum::{extract::State, Json};
use tasklane_shared::{
    models::{response::ApiResponse, user::User},
    repo::RepoError,
};

/// List users handler
///
/// Returns all live users ordered by id.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// Get user handler
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Unknown or soft-deleted user
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<User>>> {
    match state.users.find_by_id(id).await {
        Ok(user) => Ok(Json(ApiResponse::ok(user))),
        Err(RepoError::NotFound) => Err(ApiError::NotFound("User not found".to_string())),
        Err(err) => Err(err.into()),
    }
}
