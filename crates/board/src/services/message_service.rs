//! Message service: posting and editing board messages with write-time
//! mention resolution.

use std::sync::Arc;

use corkboard_database::{
    CreateMessageRequest, Message, MessageError, MessageRepository, MessageResult, User,
    UserRepository,
};
use corkboard_mentions::{InMemoryDirectory, MentionResolver, SgidSigner};
use sqlx::SqlitePool;
use tracing::debug;

/// Service for managing message operations.
///
/// Content is resolved exactly once, when it is written. Stored bodies
/// contain attachment markup instead of raw `@username` tokens, so reads
/// never touch the directory.
pub struct MessageService {
    message_repository: MessageRepository,
    user_repository: UserRepository,
    signer: Arc<SgidSigner>,
}

impl MessageService {
    /// Create a new message service instance
    pub fn new(pool: SqlitePool, signer: Arc<SgidSigner>) -> Self {
        Self {
            message_repository: MessageRepository::new(pool.clone()),
            user_repository: UserRepository::new(pool),
            signer,
        }
    }

    /// Post a new message, resolving mentions before persisting
    pub async fn post(&self, request: &CreateMessageRequest) -> MessageResult<Message> {
        request.validate().map_err(MessageError::InvalidContent)?;

        let resolved = self.resolve_content(&request.content).await?;
        self.message_repository
            .create(request.author_id, &resolved)
            .await
    }

    /// Replace a message's content, re-resolving mentions
    pub async fn edit_content(&self, message_id: i64, content: &str) -> MessageResult<Message> {
        if content.trim().is_empty() {
            return Err(MessageError::InvalidContent(
                "Content cannot be empty".to_string(),
            ));
        }

        let resolved = self.resolve_content(content).await?;
        self.message_repository
            .update_content(message_id, &resolved)
            .await
    }

    /// Get a message by its public ID
    pub async fn get_by_public_id(&self, public_id: &str) -> MessageResult<Option<Message>> {
        self.message_repository.find_by_public_id(public_id).await
    }

    /// List messages, newest first
    pub async fn list(&self, limit: u32, offset: u32) -> MessageResult<Vec<Message>> {
        self.message_repository.list(limit, offset).await
    }

    /// Delete a message by its public ID
    pub async fn delete_by_public_id(&self, public_id: &str) -> MessageResult<()> {
        let message = self
            .message_repository
            .find_by_public_id(public_id)
            .await?
            .ok_or(MessageError::MessageNotFound)?;

        self.message_repository.delete(message.id).await
    }

    /// Scan, prefetch, and substitute in one pass.
    ///
    /// The resolver itself is synchronous; the async directory is bridged
    /// by batching the scanned usernames into a single repository query
    /// and resolving against the in-memory result.
    async fn resolve_content(&self, content: &str) -> MessageResult<String> {
        let usernames = MentionResolver::scan(content);
        if usernames.is_empty() {
            return Ok(content.to_string());
        }

        let users = self
            .user_repository
            .find_by_usernames(&usernames)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        debug!(
            scanned = usernames.len(),
            matched = users.len(),
            "prefetched mention directory"
        );

        let directory: InMemoryDirectory<User> = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();

        MentionResolver::new(&self.signer)
            .resolve(content, &directory)
            .map_err(|e| MessageError::MentionResolution(e.to_string()))
    }
}
