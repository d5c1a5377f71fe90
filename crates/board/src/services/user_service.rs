//! User service for directory operations.

use corkboard_database::{CreateUserRequest, User, UserRepository, UserResult};
use sqlx::SqlitePool;
use tracing::debug;

/// Service for managing the user directory
pub struct UserService {
    user_repository: UserRepository,
    search_limit: u32,
}

impl UserService {
    /// Create a new user service instance
    pub fn new(pool: SqlitePool, search_limit: u32) -> Self {
        Self {
            user_repository: UserRepository::new(pool),
            search_limit,
        }
    }

    /// Create a new user
    pub async fn create(&self, request: &CreateUserRequest) -> UserResult<User> {
        let user = self.user_repository.create(request).await?;
        debug!(username = %user.username, "user created");
        Ok(user)
    }

    /// Live search for the mention picker: substring match on username,
    /// ordered by username ascending. An empty query returns the full
    /// directory listing up to the configured limit.
    pub async fn search(&self, query: &str) -> UserResult<Vec<User>> {
        let query = query.trim();
        if query.is_empty() {
            return self.user_repository.list(self.search_limit).await;
        }

        self.user_repository
            .search_matching(query, self.search_limit)
            .await
    }

    /// Get a user by public ID
    pub async fn get_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        self.user_repository.find_by_public_id(public_id).await
    }

    /// Get the user count
    pub async fn count(&self) -> UserResult<i64> {
        self.user_repository.count().await
    }
}
