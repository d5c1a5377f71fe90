//! # Corkboard Database Crate
//!
//! This crate provides database functionality for the Corkboard backend,
//! including connection management, migrations, and repository
//! implementations for the user directory and message board.

use corkboard_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{MessageRepository, UserRepository};

// Re-export entities
pub use entities::{
    message::{CreateMessageRequest, Message},
    user::{CreateUserRequest, User},
};

// Re-export types
pub use types::{
    errors::{DatabaseError, MessageError, UserError},
    DatabaseResult, MessageResult, UserResult,
};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::create_test_pool;

    #[tokio::test]
    async fn test_database_initialization() {
        let pool = create_test_pool().await;

        let result: (bool,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(result.0);
    }
}
