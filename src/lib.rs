pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::message_repository::{MessageRepository, PgMessageRepository};
use crate::services::message_service::MessageService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub message_service: MessageService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self::with_repository(Arc::new(PgMessageRepository::new(pool)))
    }

    pub fn with_repository(repository: Arc<dyn MessageRepository>) -> Self {
        Self {
            message_service: MessageService::new(repository),
        }
    }
}
