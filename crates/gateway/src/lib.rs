//! # Corkboard Gateway Crate
//!
//! HTTP layer for the Corkboard message board. Routes REST requests to the
//! board services, which handle mention resolution and storage.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **State**: Shared application state holding the services
//! - **Error**: HTTP status mapping for domain errors

pub mod error;
pub mod rest;
pub mod state;

pub use error::{GatewayError, GatewayResult};
pub use state::{create_test_gateway_state, GatewayState};

use axum::{http::Method, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    let mut router = Router::new()
        .nest("/api", rest::create_rest_routes().with_state(arc_state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Swagger UI in debug builds only
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health_check,
                rest::user::search_users,
                rest::user::create_user,
                rest::message::list_messages,
                rest::message::create_message,
                rest::message::get_message,
                rest::message::update_message,
                rest::message::delete_message,
            ),
            components(
                schemas(
                    rest::health::HealthResponse,
                    rest::user::UserResponse,
                    rest::user::CreateUserRequest,
                    rest::user::ErrorResponse,
                    rest::message::MessageResponse,
                    rest::message::MessageAuthorResponse,
                    rest::message::CreateMessageRequest,
                    rest::message::UpdateMessageRequest,
                )
            ),
            tags(
                (name = "Health", description = "Service health"),
                (name = "Users", description = "User directory and live search"),
                (name = "Messages", description = "Board messages with mention resolution"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
