use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::message::{CreateMessage, Message};

/// Storage port for messages. Rows are append-only: there is no update or
/// delete. Implementations report failures without retrying.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Inserts a row and returns it with the store-assigned `id` and `created_at`.
    async fn insert(&self, message: &CreateMessage) -> Result<Message>;

    /// All rows, newest first.
    async fn select_all(&self) -> Result<Vec<Message>>;

    /// `None` when no row has this id.
    async fn select_by_id(&self, id: i32) -> Result<Option<Message>>;
}

#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn insert(&self, message: &CreateMessage) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (name, phone, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, message, created_at
            "#,
        )
        .bind(&message.name)
        .bind(&message.phone)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn select_all(&self) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, name, phone, message, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn select_by_id(&self, id: i32) -> Result<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, name, phone, message, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }
}
