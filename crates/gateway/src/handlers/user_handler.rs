//! User handlers.
//!
//! Each handler forwards to one use case and picks the success status; error
//! statuses come from `AppError`'s `IntoResponse` impl.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};

use common::AppResult;
use user_service_lib::service::{UserRequest, UserResponse};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_users).post(create_user))
        .route("/active", get(get_all_active_users))
        .route("/:id", get(get_user_by_id).put(update_user).delete(delete_user))
        .route("/:id/activate", patch(activate_user))
        .route("/:id/deactivate", patch(deactivate_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_id(&id).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>)
    )
)]
pub async fn get_all_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.get_all_users().await?;
    Ok(Json(users))
}

/// List active users
#[utoipa::path(
    get,
    path = "/api/v1/users/active",
    tag = "Users",
    responses(
        (status = 200, description = "Active users", body = Vec<UserResponse>)
    )
)]
pub async fn get_all_active_users(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.get_all_active_users().await?;
    Ok(Json(users))
}

/// Update a user's names and email
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error or email change not allowed"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(&id, payload).await?;
    Ok(Json(user))
}

/// Activate a user
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/activate",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User activated", body = UserResponse),
        (status = 400, description = "User is already active"),
        (status = 404, description = "User not found")
    )
)]
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.activate_user(&id).await?;
    Ok(Json(user))
}

/// Deactivate a user
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/deactivate",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deactivated", body = UserResponse),
        (status = 400, description = "User is already inactive"),
        (status = 404, description = "User not found")
    )
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.deactivate_user(&id).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
