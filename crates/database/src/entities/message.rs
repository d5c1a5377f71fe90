use serde::{Deserialize, Serialize};

/// A message on the board. `content` is the rich-text body with mention
/// tokens already substituted; resolution happens before the row is
/// written. Author fields are denormalized from the users table when the
/// row is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    /// Author's database id
    pub author_id: i64,
    /// Author's public identifier
    pub author_public_id: String,
    /// Author's username
    pub author_username: String,
    /// Resolved rich-text body
    pub content: String,
    /// When the message was created
    pub created_at: String,
    /// When the message was last updated
    pub updated_at: String,
}

/// Request to create a new message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    /// Author's database id
    pub author_id: i64,
    /// Raw rich-text body, mention tokens unresolved
    pub content: String,
}

impl CreateMessageRequest {
    /// Validate the create request
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Content cannot be empty".to_string());
        }

        if self.content.len() > 65_536 {
            return Err("Content too long (max 64KiB)".to_string());
        }

        Ok(())
    }
}
