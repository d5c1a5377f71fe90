//! Message REST endpoints

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub edited: bool,
    pub author: MessageAuthorResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageAuthorResponse {
    pub id: String,
    pub username: String,
}

impl From<corkboard_database::Message> for MessageResponse {
    fn from(message: corkboard_database::Message) -> Self {
        Self {
            id: message.public_id,
            content: message.content,
            edited: message.updated_at != message.created_at,
            created_at: message.created_at,
            updated_at: message.updated_at,
            author: MessageAuthorResponse {
                id: message.author_public_id,
                username: message.author_username,
            },
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    /// Public ID of the authoring user
    pub author_id: String,
    /// Rich-text body; `@username` tokens are resolved before storage
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListMessagesQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Create message routes
pub fn create_message_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/messages",
            axum::routing::get(list_messages).post(create_message),
        )
        .route(
            "/messages/:message_id",
            axum::routing::get(get_message)
                .put(update_message)
                .delete(delete_message),
        )
}

#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Messages, newest first", body = Vec<MessageResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_messages(
    Query(params): Query<ListMessagesQuery>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<MessageResponse>>> {
    let messages = state
        .message_service
        .list(params.limit.unwrap_or(50), params.offset.unwrap_or(0))
        .await?;

    Ok(Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message created with mentions resolved", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_message(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateMessageRequest>,
) -> GatewayResult<impl IntoResponse> {
    let author = state
        .user_service
        .get_by_public_id(&payload.author_id)
        .await?
        .ok_or_else(|| GatewayError::NotFound("Author not found".to_string()))?;

    let message = state
        .message_service
        .post(&corkboard_database::CreateMessageRequest {
            author_id: author.id,
            content: payload.content,
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(MessageResponse::from(message)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/messages/{message_id}",
    tag = "Messages",
    params(("message_id" = String, Path, description = "Message public ID")),
    responses(
        (status = 200, description = "Message details", body = MessageResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_message(
    Path(message_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<MessageResponse>> {
    let message = state
        .message_service
        .get_by_public_id(&message_id)
        .await?
        .ok_or_else(|| GatewayError::NotFound("Message not found".to_string()))?;

    Ok(Json(MessageResponse::from(message)))
}

#[utoipa::path(
    put,
    path = "/api/messages/{message_id}",
    tag = "Messages",
    params(("message_id" = String, Path, description = "Message public ID")),
    request_body = UpdateMessageRequest,
    responses(
        (status = 200, description = "Message updated, mentions re-resolved", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_message(
    Path(message_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<UpdateMessageRequest>,
) -> GatewayResult<Json<MessageResponse>> {
    let message = state
        .message_service
        .get_by_public_id(&message_id)
        .await?
        .ok_or_else(|| GatewayError::NotFound("Message not found".to_string()))?;

    let updated = state
        .message_service
        .edit_content(message.id, &payload.content)
        .await?;

    Ok(Json(MessageResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/messages/{message_id}",
    tag = "Messages",
    params(("message_id" = String, Path, description = "Message public ID")),
    responses(
        (status = 204, description = "Message deleted successfully"),
        (status = 404, description = "Message not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_message(
    Path(message_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<impl IntoResponse> {
    state
        .message_service
        .delete_by_public_id(&message_id)
        .await?;

    Ok(axum::http::StatusCode::NO_CONTENT)
}
