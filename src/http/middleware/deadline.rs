//! Whole-request deadline.
//!
//! An expired request answers `504` with the usual `{error}` body. For a
//! send the broadcast may already have happened, so the message says so.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::http::request::RequestIdExt;
use crate::http::response::ApiError;

pub async fn enforce_deadline(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = request.request_id().to_string();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%request_id, %path, limit_secs = limit.as_secs(), "Request deadline exceeded");
            ApiError::Timeout(limit.as_secs()).into_response()
        }
    }
}
