use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dto::message_dto::ApiResponse;
use crate::models::message::{CreateMessage, Message};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures as the form presents them; `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Text reported by the server (field errors or envelope message).
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid form data")]
    InvalidData,
    #[error("Message not found")]
    NotFound,
    #[error("Internal server error")]
    Server,
    #[error("Server response timed out")]
    Timeout,
    #[error("Could not connect to the server. Check your connection.")]
    Connection,
    #[error("Unknown error while sending message")]
    Unknown,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        debug!(error = ?err, "API transport error");
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection
        } else {
            ClientError::Unknown
        }
    }
}

/// Transport seam used by the form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, payload: &CreateMessage) -> Result<Message, ClientError>;
}

#[derive(Clone)]
pub struct MessageApiClient {
    http: Client,
    base_url: String,
}

impl MessageApiClient {
    /// `server_url` is the origin the backend listens on, e.g. `http://localhost:5000`.
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: format!("{}/api", server_url.trim_end_matches('/')),
        })
    }

    pub async fn get_all_messages(&self) -> Result<Vec<Message>, ClientError> {
        let url = format!("{}/messages", self.base_url);
        debug!(method = "GET", %url, "API request");
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let envelope: ApiResponse<Vec<Message>> = read_envelope(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn get_message_by_id(&self, id: i32) -> Result<Message, ClientError> {
        let url = format!("{}/messages/{}", self.base_url, id);
        debug!(method = "GET", %url, "API request");
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        let envelope: ApiResponse<Message> = read_envelope(response).await?;
        envelope.data.ok_or(ClientError::NotFound)
    }
}

#[async_trait]
impl MessageSender for MessageApiClient {
    async fn send_message(&self, payload: &CreateMessage) -> Result<Message, ClientError> {
        let url = format!("{}/messages", self.base_url);
        debug!(method = "POST", %url, "API request");
        let response = self.http.post(&url).json(payload).send().await?;
        let envelope: ApiResponse<Message> = read_envelope(response).await?;
        envelope.data.ok_or(ClientError::Unknown)
    }
}

/// Decodes the envelope of a response, turning unsuccessful ones into the
/// most specific [`ClientError`] available.
async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    debug!(status = status.as_u16(), %body, "API response");

    let envelope = serde_json::from_str::<ApiResponse<T>>(&body).ok();
    match envelope {
        Some(envelope) if status.is_success() && envelope.success => Ok(envelope),
        Some(envelope) => Err(rejection(status, envelope.errors, envelope.message)),
        None => {
            let failure = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body).ok();
            let (errors, message) = failure
                .map(|f| (f.errors, f.message))
                .unwrap_or((None, None));
            Err(rejection(status, errors, message))
        }
    }
}

pub fn rejection(
    status: StatusCode,
    errors: Option<Vec<String>>,
    message: Option<String>,
) -> ClientError {
    if let Some(errors) = errors.filter(|errors| !errors.is_empty()) {
        return ClientError::Rejected(errors.join(", "));
    }
    if let Some(message) = message.filter(|message| !message.is_empty()) {
        return ClientError::Rejected(message);
    }
    match status {
        StatusCode::BAD_REQUEST => ClientError::InvalidData,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::INTERNAL_SERVER_ERROR => ClientError::Server,
        _ => ClientError::Unknown,
    }
}
