//! User repository for database operations.

use crate::entities::{CreateUserRequest, User};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const USER_COLUMNS: &str = "id, public_id, username, display_name, created_at, updated_at";

/// Repository for user database operations.
///
/// This is the persistence side of the mention directory: exact username
/// lookups are case-insensitive (NOCASE folds ASCII, which covers the
/// whole username alphabet enforced at validation), and substring search
/// is ordered by username ascending for the live-search picker.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &SqliteRow) -> User {
        User {
            id: row.get("id"),
            public_id: row.get("public_id"),
            username: row.get("username"),
            display_name: row.get("display_name"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::user_from_row))
    }

    /// Find user by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::user_from_row))
    }

    /// Find user by username, case-insensitively
    pub async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? COLLATE NOCASE"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::user_from_row))
    }

    /// Batch lookup by username, case-insensitively.
    ///
    /// Backs the mention-resolution prefetch: one query for every username
    /// the scanner found in a body of content. Unknown usernames are simply
    /// absent from the result.
    pub async fn find_by_usernames(&self, usernames: &[&str]) -> UserResult<Vec<User>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = usernames.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let query_str = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username COLLATE NOCASE IN ({placeholders})"
        );

        let mut query = sqlx::query(&query_str);
        for username in usernames {
            query = query.bind(*username);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::user_from_row).collect())
    }

    /// Substring search on username, ordered by username ascending
    pub async fn search_matching(&self, query: &str, limit: u32) -> UserResult<Vec<User>> {
        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username LIKE ? ESCAPE '\'
            ORDER BY username ASC
            LIMIT ?
            "#
        ))
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::user_from_row).collect())
    }

    /// List users ordered by username ascending
    pub async fn list(&self, limit: u32) -> UserResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username ASC LIMIT ?"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::user_from_row).collect())
    }

    /// Create new user
    pub async fn create(&self, request: &CreateUserRequest) -> UserResult<User> {
        request.validate().map_err(UserError::ValidationError)?;

        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::cuid();

        let result = sqlx::query(
            "INSERT INTO users (public_id, username, display_name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&public_id)
        .bind(&request.username)
        .bind(&request.display_name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                UserError::UsernameAlreadyExists
            } else {
                UserError::DatabaseError(e.to_string())
            }
        })?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::DatabaseError("Failed to retrieve created user".to_string()))
    }

    /// Get user count
    pub async fn count(&self) -> UserResult<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }
}

/// Escape LIKE metacharacters in a user-supplied search query
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_pool;

    async fn seed(repo: &UserRepository, username: &str, display_name: &str) -> User {
        repo.create(&CreateUserRequest {
            username: username.to_string(),
            display_name: display_name.to_string(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_user_creation_and_retrieval() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = seed(&repo, "ada", "Ada Lovelace").await;
        assert_eq!(created.username, "ada");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.public_id, created.public_id);

        let by_public_id = repo
            .find_by_public_id(&created.public_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_public_id.id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_username_is_case_insensitive() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        seed(&repo, "ada", "Ada Lovelace").await;

        let found = repo.find_by_username("ADA").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username, "ada");

        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_case_insensitively() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        seed(&repo, "ada", "Ada Lovelace").await;

        let duplicate = repo
            .create(&CreateUserRequest {
                username: "Ada".to_string(),
                display_name: "Someone Else".to_string(),
            })
            .await;

        assert!(matches!(duplicate, Err(UserError::UsernameAlreadyExists)));
    }

    #[tokio::test]
    async fn test_batch_lookup_skips_unknown_usernames() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        seed(&repo, "ada", "Ada Lovelace").await;
        seed(&repo, "grace", "Grace Hopper").await;

        let found = repo
            .find_by_usernames(&["Ada", "nobody", "grace"])
            .await
            .unwrap();

        let mut usernames: Vec<_> = found.iter().map(|u| u.username.as_str()).collect();
        usernames.sort();
        assert_eq!(usernames, vec!["ada", "grace"]);

        assert!(repo.find_by_usernames(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_matching_orders_by_username() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        seed(&repo, "grace", "Grace Hopper").await;
        seed(&repo, "ada", "Ada Lovelace").await;
        seed(&repo, "adrian", "Adrian").await;

        let results = repo.search_matching("ad", 10).await.unwrap();
        let usernames: Vec<_> = results.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(usernames, vec!["ada", "adrian"]);

        let limited = repo.search_matching("a", 2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_search_escapes_like_metacharacters() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        seed(&repo, "ada", "Ada Lovelace").await;

        // A bare "%" would otherwise match every row.
        let results = repo.search_matching("%", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_count() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        assert_eq!(repo.count().await.unwrap(), 0);
        seed(&repo, "ada", "Ada Lovelace").await;
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
