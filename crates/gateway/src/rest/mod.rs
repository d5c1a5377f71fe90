//! REST API endpoints for the gateway

pub mod health;
pub mod message;
pub mod user;

use crate::state::GatewayState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create all REST API routes. Mounted under `/api` by the router builder.
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(user::create_user_routes())
        .merge(message::create_message_routes())
}
