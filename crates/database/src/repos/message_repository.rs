//! Message repository for database operations.

use crate::entities::Message;
use crate::types::{MessageError, MessageResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const MESSAGE_COLUMNS: &str = "m.id, m.public_id, m.author_id, u.public_id AS author_public_id, \
     u.username AS author_username, m.content, m.created_at, m.updated_at";

/// Repository for message database operations.
///
/// Reads join the users table so every message carries its author's public
/// identity.
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn message_from_row(row: &SqliteRow) -> Message {
        Message {
            id: row.get("id"),
            public_id: row.get("public_id"),
            author_id: row.get("author_id"),
            author_public_id: row.get("author_public_id"),
            author_username: row.get("author_username"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// Find message by ID
    pub async fn find_by_id(&self, id: i64) -> MessageResult<Option<Message>> {
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m JOIN users u ON u.id = m.author_id WHERE m.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::message_from_row))
    }

    /// Find message by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> MessageResult<Option<Message>> {
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m JOIN users u ON u.id = m.author_id WHERE m.public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::message_from_row))
    }

    /// List messages, newest first
    pub async fn list(&self, limit: u32, offset: u32) -> MessageResult<Vec<Message>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages m
            JOIN users u ON u.id = m.author_id
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::message_from_row).collect())
    }

    /// Insert a message whose content has already been through mention
    /// resolution
    pub async fn create(&self, author_id: i64, content: &str) -> MessageResult<Message> {
        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::cuid();

        let result = sqlx::query(
            "INSERT INTO messages (public_id, author_id, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&public_id)
        .bind(author_id)
        .bind(content)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY constraint failed") {
                MessageError::AuthorNotFound
            } else {
                MessageError::DatabaseError(e.to_string())
            }
        })?;

        let message_id = result.last_insert_rowid();

        self.find_by_id(message_id).await?.ok_or_else(|| {
            MessageError::DatabaseError("Failed to retrieve created message".to_string())
        })
    }

    /// Single-column content update
    pub async fn update_content(&self, id: i64, content: &str) -> MessageResult<Message> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("UPDATE messages SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(MessageError::MessageNotFound);
        }

        self.find_by_id(id)
            .await?
            .ok_or(MessageError::MessageNotFound)
    }

    /// Delete a message
    pub async fn delete(&self, id: i64) -> MessageResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(MessageError::MessageNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CreateUserRequest;
    use crate::repos::UserRepository;
    use crate::test_support::create_test_pool;

    async fn seed_author(pool: &SqlitePool) -> i64 {
        UserRepository::new(pool.clone())
            .create(&CreateUserRequest {
                username: "ada".to_string(),
                display_name: "Ada Lovelace".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_message_creation_and_retrieval() {
        let pool = create_test_pool().await;
        let repo = MessageRepository::new(pool.clone());
        let author_id = seed_author(&pool).await;

        let created = repo.create(author_id, "hello board").await.unwrap();
        assert_eq!(created.content, "hello board");
        assert_eq!(created.author_id, author_id);
        assert_eq!(created.author_username, "ada");

        let found = repo
            .find_by_public_id(&created.public_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.author_public_id, created.author_public_id);
    }

    #[tokio::test]
    async fn test_unknown_author_is_rejected() {
        let pool = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        let result = repo.create(999, "orphan message").await;
        assert!(matches!(result, Err(MessageError::AuthorNotFound)));
    }

    #[tokio::test]
    async fn test_update_content_is_single_column() {
        let pool = create_test_pool().await;
        let repo = MessageRepository::new(pool.clone());
        let author_id = seed_author(&pool).await;

        let created = repo.create(author_id, "before").await.unwrap();
        let updated = repo.update_content(created.id, "after").await.unwrap();

        assert_eq!(updated.content, "after");
        assert_eq!(updated.public_id, created.public_id);
        assert_eq!(updated.created_at, created.created_at);

        let missing = repo.update_content(999, "nope").await;
        assert!(matches!(missing, Err(MessageError::MessageNotFound)));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = create_test_pool().await;
        let repo = MessageRepository::new(pool.clone());
        let author_id = seed_author(&pool).await;

        repo.create(author_id, "first").await.unwrap();
        repo.create(author_id, "second").await.unwrap();

        let messages = repo.list(10, 0).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "second");
        assert_eq!(messages[1].content, "first");
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = create_test_pool().await;
        let repo = MessageRepository::new(pool.clone());
        let author_id = seed_author(&pool).await;

        let created = repo.create(author_id, "to delete").await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await,
            Err(MessageError::MessageNotFound)
        ));
    }
}
