use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::dto::message_dto::ApiResponse;

pub type Result<T> = std::result::Result<T, Error>;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage failure already logged by the service; the text is safe to show clients.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::failure("Validation failed").with_errors(errors),
            ),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiResponse::failure(msg)),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::failure(msg)),
            Error::Persistence(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ApiResponse::failure(msg))
            }
            other => {
                tracing::error!(error = ?other, "Unhandled error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(INTERNAL_ERROR_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
