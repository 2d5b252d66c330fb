use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::message_dto::{ApiResponse, MessageListResponse, MessageResponse},
    error::{Error, Result},
    models::message::CreateMessage,
    AppState,
};

pub const INVALID_ID: &str = "Invalid message ID. ID must be a positive number";

/// Path ids must be a plain positive decimal integer: ASCII digits only, no
/// sign.
pub fn parse_message_id(raw: &str) -> Result<i32> {
    let invalid = || Error::BadRequest(INVALID_ID.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = CreateMessage,
    responses(
        (status = 201, description = "Message created successfully", body = MessageResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Failed to save message")
    )
)]
#[axum::debug_handler]
pub async fn create_message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateMessage>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    let message = state.message_service.create(payload).await?;
    let body: MessageResponse =
        ApiResponse::success(message).with_message("Message created successfully");
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/messages",
    responses(
        (status = 200, description = "Messages, newest first", body = MessageListResponse),
        (status = 500, description = "Failed to fetch messages")
    )
)]
#[axum::debug_handler]
pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let messages = state.message_service.get_all().await?;
    let count = messages.len();
    let body: MessageListResponse = ApiResponse::success(messages)
        .with_count(count)
        .with_message("Messages fetched successfully");
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    params(
        ("id" = i32, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message found", body = MessageResponse),
        (status = 400, description = "Invalid message ID"),
        (status = 404, description = "Message not found"),
        (status = 500, description = "Failed to fetch message")
    )
)]
#[axum::debug_handler]
pub async fn get_message(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id.map_err(|_| Error::BadRequest(INVALID_ID.to_string()))?;
    let id = parse_message_id(&id)?;
    let message = state.message_service.get_by_id(id).await?;
    let body: MessageResponse =
        ApiResponse::success(message).with_message("Message fetched successfully");
    Ok(Json(body))
}
