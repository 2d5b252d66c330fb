//! In-memory [`MessageRepository`] for tests and local runs without PostgreSQL.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::database::message_repository::MessageRepository;
use crate::error::{Error, Result};
use crate::models::message::{CreateMessage, Message};
use crate::utils::time::now;

#[derive(Debug, Default)]
struct Rows {
    next_id: i32,
    messages: Vec<Message>,
}

/// Assigns ids from 1 and stamps `created_at` at insert, like the
/// `messages` table defaults do.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageRepository {
    rows: Arc<RwLock<Rows>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.messages.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> Error {
    Error::Internal("in-memory message store lock poisoned".to_string())
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: &CreateMessage) -> Result<Message> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.next_id += 1;
        let stored = Message {
            id: rows.next_id,
            name: message.name.clone(),
            phone: message.phone.clone(),
            message: message.message.clone(),
            created_at: now(),
        };
        rows.messages.push(stored.clone());
        Ok(stored)
    }

    async fn select_all(&self) -> Result<Vec<Message>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        let mut messages = rows.messages.clone();
        messages.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(messages)
    }

    async fn select_by_id(&self, id: i32) -> Result<Option<Message>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.messages.iter().find(|m| m.id == id).cloned())
    }
}
