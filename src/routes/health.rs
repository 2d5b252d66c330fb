use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::message_dto::HealthResponse;
use crate::utils::time::{now, to_rfc3339};

pub const SERVICE_NAME: &str = "Message App API";

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "OK".to_string(),
        timestamp: to_rfc3339(now()),
        service: SERVICE_NAME.to_string(),
    };
    (StatusCode::OK, Json(body))
}

pub async fn root() -> &'static str {
    "Message App Server is running!"
}
