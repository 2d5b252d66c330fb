use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};

use crate::dto::message_dto::ApiResponse;

/// Rejects requests that declare a non-JSON body. Requests without a
/// `Content-Type` header pass through untouched.
pub async fn require_json_content_type(req: Request<Body>, next: Next) -> Response {
    let declared = req
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap_or_default().to_ascii_lowercase());

    if let Some(content_type) = declared {
        if !content_type.contains("application/json") {
            let body = ApiResponse::<()>::failure("Content-Type must be application/json");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    }

    next.run(req).await
}
