//! Shared types for the database layer

pub mod errors;

pub use errors::{DatabaseError, MessageError, UserError};

/// Result type for general database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;

/// Result type for message operations
pub type MessageResult<T> = Result<T, MessageError>;
