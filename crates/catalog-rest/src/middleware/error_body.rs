//! Renders the structured error body.

use crate::responses::{ApiError, ErrorDetails};
use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tower_http::request_id::RequestId;
use uuid::Uuid;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Replaces the body of failed responses carrying [`ErrorDetails`] with an
/// [`ApiError`] naming the request path and correlation id.
///
/// The correlation id is the inbound `x-request-id` when present, otherwise
/// a fresh UUID v4.
pub async fn error_body_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.header_value().clone())
        .or_else(|| request.headers().get(REQUEST_ID_HEADER).cloned())
        .and_then(|value| value.to_str().ok().map(ToString::to_string))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let response = next.run(request).await;
    let Some(details) = response.extensions().get::<ErrorDetails>().cloned() else {
        return response;
    };

    let body = ApiError {
        timestamp: Utc::now(),
        path,
        status: details.status.as_u16(),
        error: details.message,
        request_id: request_id.clone(),
    };

    let mut rendered = (details.status, Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        rendered.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    rendered
}
