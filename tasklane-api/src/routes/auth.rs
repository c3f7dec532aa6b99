/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register new user
/// - `POST /api/auth/login` - Login and get an access token

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tasklane_shared::models::{
    response::ApiResponse,
    user::{NewUser, User},
};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginData {
    /// Signed access token
    pub token: String,

    /// The authenticated user
    pub user: User,
}

/// Register a new user
///
/// Creates a new user account. Usernames and emails are unique among live
/// accounts; a losing duplicate registration reports a conflict.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "correct-horse",
///   "full_name": "Alice Example"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "User registered successfully",
///   "data": { "id": 1, "username": "alice", ... }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing username, email, or password
/// - `409 Conflict`: Username or email already exists
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.auth.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "User registered successfully",
            user,
        )),
    ))
}

/// Login endpoint
///
/// Authenticates a user and returns a signed access token together with the
/// user record. Unknown emails and wrong passwords answer identically.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "correct-horse"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "data": { "token": "eyJ...", "user": { "id": 1, ... } }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginData>>> {
    let (user, token) = state.auth.login(&input.email, &input.password).await?;

    Ok(Json(ApiResponse::ok_with_message(
        "Login successful",
        LoginData { token, user },
    )))
}
