//! Error types for mention resolution.

use thiserror::Error;

/// Errors surfaced while resolving mentions or signing references.
///
/// A username with no directory entry is not an error; lookups report that
/// as `Ok(None)` and the resolver leaves the token untouched.
#[derive(Debug, Error)]
pub enum MentionError {
    #[error("directory lookup failed: {0}")]
    Directory(String),

    #[error("failed to sign attachment reference: {0}")]
    Signing(String),

    #[error("invalid attachment reference: {0}")]
    InvalidReference(String),
}

/// Result type for mention operations
pub type MentionResult<T> = Result<T, MentionError>;
