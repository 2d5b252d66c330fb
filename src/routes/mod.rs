pub mod health;
pub mod message;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{content_type::require_json_content_type, cors::cors_layer};
use crate::AppState;

/// Largest accepted request body; a full message is far below this.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Mount `GET /api/messages` and `GET /api/messages/:id`.
    pub read_api_enabled: bool,
    pub cors_allowed_origins: Vec<String>,
}

pub fn app(state: AppState, options: &RouterOptions) -> Router {
    let mut messages = if options.read_api_enabled {
        Router::new().route(
            "/messages",
            post(message::create_message).get(message::list_messages),
        )
    } else {
        Router::new().route("/messages", post(message::create_message))
    };

    if options.read_api_enabled {
        messages = messages.route("/messages/:id", get(message::get_message));
    }

    let api = messages
        .layer(middleware::from_fn(require_json_content_type))
        .route("/health", get(health::health));

    Router::new()
        .route("/", get(health::root))
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(&options.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
