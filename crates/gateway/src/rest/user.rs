//! User directory REST endpoints

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::GatewayResult;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub created_at: String,
}

impl From<corkboard_database::User> for UserResponse {
    fn from(user: corkboard_database::User) -> Self {
        Self {
            id: user.public_id,
            username: user.username,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListUsersQuery {
    /// Substring to match against usernames
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Create user routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new().route(
        "/users",
        axum::routing::get(search_users).post(create_user),
    )
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users matching the query, ordered by username", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn search_users(
    Query(params): Query<ListUsersQuery>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .search(params.q.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateUserRequest>,
) -> GatewayResult<impl IntoResponse> {
    let user = state
        .user_service
        .create(&corkboard_database::CreateUserRequest {
            username: payload.username,
            display_name: payload.display_name,
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserResponse::from(user)),
    ))
}
