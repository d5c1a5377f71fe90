//! Shared application state for the gateway

use std::sync::Arc;

use corkboard_board::{MessageService, UserService};
use corkboard_config::{AppConfig, MentionsConfig};
use corkboard_database::initialize_database;
use corkboard_mentions::SgidSigner;
use sqlx::SqlitePool;

use crate::error::{GatewayError, GatewayResult};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// User directory service
    pub user_service: Arc<UserService>,
    /// Message board service
    pub message_service: Arc<MessageService>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(pool: SqlitePool, mentions: &MentionsConfig) -> Self {
        let signer = Arc::new(SgidSigner::new(
            &mentions.signing_secret,
            mentions.sgid_issuer.clone(),
        ));

        let user_service = Arc::new(UserService::new(pool.clone(), mentions.search_limit));
        let message_service = Arc::new(MessageService::new(pool.clone(), signer));

        Self {
            pool,
            user_service,
            message_service,
        }
    }

    /// Create gateway state from application configuration
    pub async fn from_config(config: &AppConfig) -> GatewayResult<Self> {
        let pool = initialize_database(&config.database)
            .await
            .map_err(|e| GatewayError::DatabaseError(e.to_string()))?;

        Ok(Self::new(pool, &config.mentions))
    }
}

/// Create a gateway state backed by an in-memory database, for tests
pub async fn create_test_gateway_state() -> GatewayResult<GatewayState> {
    let mut config = AppConfig::default();
    config.database.url = "sqlite://:memory:".to_string();
    config.database.max_connections = 1;
    GatewayState::from_config(&config).await
}
