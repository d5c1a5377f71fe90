use chrono::Utc;
use corkboard_mentions::Attachable;
use serde::{Deserialize, Serialize};

/// Represents a user in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    /// Unique username, compared case-insensitively
    pub username: String,
    /// Display name for the user
    pub display_name: String,
    /// When the user was created
    pub created_at: String,
    /// When the user was last updated
    pub updated_at: String,
}

impl User {
    /// Create a new user instance
    pub fn new(username: String, display_name: String) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: 0, // Will be set by database
            public_id: cuid2::cuid(),
            username,
            display_name,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Attachable for User {
    fn reference_kind(&self) -> &'static str {
        "user"
    }

    fn reference_id(&self) -> String {
        self.public_id.clone()
    }

    fn display_fragment(&self) -> String {
        if self.display_name.trim().is_empty() {
            self.username.clone()
        } else {
            self.display_name.clone()
        }
    }
}

/// Request to create a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Unique username
    pub username: String,
    /// Display name
    pub display_name: String,
}

impl CreateUserRequest {
    /// Validate the create request
    ///
    /// Usernames are restricted to ASCII word characters: every username is
    /// reachable by the mention pattern, and case-insensitive comparison
    /// agrees between SQLite's NOCASE collation (ASCII-only folding) and
    /// Rust-side lowercasing.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        if self.username.len() > 50 {
            return Err("Username too long (max 50 characters)".to_string());
        }

        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(
                "Username may only contain ASCII letters, digits, and underscores".to_string(),
            );
        }

        if self.display_name.trim().is_empty() {
            return Err("Display name cannot be empty".to_string());
        }

        if self.display_name.len() > 100 {
            return Err("Display name too long (max 100 characters)".to_string());
        }

        Ok(())
    }
}
