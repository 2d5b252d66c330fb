use std::sync::Arc;

use tracing::{error, info};

use crate::database::message_repository::MessageRepository;
use crate::error::{Error, Result};
use crate::models::message::{CreateMessage, Message};
use crate::utils::validation::validate_create_message;

pub const SAVE_FAILED: &str = "Failed to save message to database";
pub const FETCH_ALL_FAILED: &str = "Failed to fetch messages from database";
pub const FETCH_ONE_FAILED: &str = "Failed to fetch message from database";
pub const NOT_FOUND: &str = "Message not found";

/// Validation then persistence for contact messages.
#[derive(Clone)]
pub struct MessageService {
    repository: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// Rejects invalid input before the store is touched; storage failures are
    /// logged here and surface only as a generic persistence error.
    pub async fn create(&self, input: CreateMessage) -> Result<Message> {
        let errors = validate_create_message(&input);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let message = self
            .repository
            .insert(&input.trimmed())
            .await
            .map_err(|e| persistence_failure(e, SAVE_FAILED))?;

        info!(message_id = message.id, "Message created");
        Ok(message)
    }

    pub async fn get_all(&self) -> Result<Vec<Message>> {
        self.repository
            .select_all()
            .await
            .map_err(|e| persistence_failure(e, FETCH_ALL_FAILED))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Message> {
        self.repository
            .select_by_id(id)
            .await
            .map_err(|e| persistence_failure(e, FETCH_ONE_FAILED))?
            .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))
    }
}

fn persistence_failure(err: Error, public_message: &str) -> Error {
    error!(error = ?err, "{}", public_message);
    Error::Persistence(public_message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::message_repository::MockMessageRepository;
    use chrono::{TimeZone, Utc};
    use tokio_test::{assert_err, assert_ok};

    fn stored(id: i32, input: &CreateMessage) -> Message {
        Message {
            id,
            name: input.name.clone(),
            phone: input.phone.clone(),
            message: input.message.clone(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, id as u32).unwrap(),
        }
    }

    fn service(mock: MockMessageRepository) -> MessageService {
        MessageService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn create_persists_trimmed_valid_input() {
        let mut mock = MockMessageRepository::new();
        mock.expect_insert()
            .withf(|m| m.name == "Jo" && m.phone == "+375291234567" && m.message == "Hi")
            .times(1)
            .returning(|m| Ok(stored(7, m)));

        let created = assert_ok!(
            service(mock)
                .create(CreateMessage::new(" Jo ", "+375291234567 ", "Hi"))
                .await
        );
        assert_eq!(created.id, 7);
        assert_eq!(created.name, "Jo");
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_storage() {
        let mut mock = MockMessageRepository::new();
        mock.expect_insert().never();

        let err = assert_err!(
            service(mock)
                .create(CreateMessage::new("J", "123", ""))
                .await
        );
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].starts_with("Name"));
                assert!(errors[1].starts_with("Phone"));
                assert!(errors[2].starts_with("Message"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_reports_only_the_offending_field() {
        let mut mock = MockMessageRepository::new();
        mock.expect_insert().never();

        let err = service(mock)
            .create(CreateMessage::new("Jo", "+375291234567", "x".repeat(1001)))
            .await
            .unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("Message"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_hides_storage_failure_details() {
        let mut mock = MockMessageRepository::new();
        mock.expect_insert()
            .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));

        let err = service(mock)
            .create(CreateMessage::new("Jo", "80291234567", "Hi"))
            .await
            .unwrap_err();
        match err {
            Error::Persistence(msg) => assert_eq!(msg, SAVE_FAILED),
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_all_passes_through_empty_store() {
        let mut mock = MockMessageRepository::new();
        mock.expect_select_all().returning(|| Ok(Vec::new()));

        let messages = assert_ok!(service(mock).get_all().await);
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn get_all_maps_storage_failure() {
        let mut mock = MockMessageRepository::new();
        mock.expect_select_all()
            .returning(|| Err(Error::Database(sqlx::Error::PoolClosed)));

        match service(mock).get_all().await.unwrap_err() {
            Error::Persistence(msg) => assert_eq!(msg, FETCH_ALL_FAILED),
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_by_id_distinguishes_missing_rows() {
        let mut mock = MockMessageRepository::new();
        mock.expect_select_by_id()
            .withf(|id| *id == 999_999)
            .returning(|_| Ok(None));

        match service(mock).get_by_id(999_999).await.unwrap_err() {
            Error::NotFound(msg) => assert_eq!(msg, NOT_FOUND),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_by_id_maps_storage_failure() {
        let mut mock = MockMessageRepository::new();
        mock.expect_select_by_id()
            .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));

        match service(mock).get_by_id(1).await.unwrap_err() {
            Error::Persistence(msg) => assert_eq!(msg, FETCH_ONE_FAILED),
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_by_id_returns_row() {
        let input = CreateMessage::new("Jo", "80291234567", "Hi");
        let row = stored(3, &input);
        let expected = row.clone();
        let mut mock = MockMessageRepository::new();
        mock.expect_select_by_id()
            .returning(move |_| Ok(Some(row.clone())));

        assert_eq!(service(mock).get_by_id(3).await.unwrap(), expected);
    }
}
