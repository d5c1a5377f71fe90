//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// User-specific database errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Message-specific database errors
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Message not found")]
    MessageNotFound,

    #[error("Author not found")]
    AuthorNotFound,

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Mention resolution failed: {0}")]
    MentionResolution(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
