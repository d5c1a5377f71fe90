//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::InternalError(_) | GatewayError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = json!({
            "error": status.as_str(),
            "message": self.to_string(),
        });

        (status, Json(error_response)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<corkboard_database::UserError> for GatewayError {
    fn from(error: corkboard_database::UserError) -> Self {
        use corkboard_database::UserError;
        match error {
            UserError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            UserError::UsernameAlreadyExists => {
                GatewayError::Conflict("Username already exists".to_string())
            }
            UserError::ValidationError(msg) => GatewayError::InvalidRequest(msg),
            UserError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<corkboard_database::MessageError> for GatewayError {
    fn from(error: corkboard_database::MessageError) -> Self {
        use corkboard_database::MessageError;
        match error {
            MessageError::MessageNotFound => {
                GatewayError::NotFound("Message not found".to_string())
            }
            MessageError::AuthorNotFound => GatewayError::NotFound("Author not found".to_string()),
            MessageError::InvalidContent(msg) => GatewayError::InvalidRequest(msg),
            MessageError::MentionResolution(msg) => GatewayError::InternalError(msg),
            MessageError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        GatewayError::DatabaseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            GatewayError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_mention_is_not_an_error() {
        // A message containing an unresolvable token persists unchanged;
        // there is no error variant for it to map to.
        let error = corkboard_database::MessageError::InvalidContent("empty".to_string());
        assert!(matches!(
            GatewayError::from(error),
            GatewayError::InvalidRequest(_)
        ));
    }
}
