//! Error responses.
//!
//! Every failure leaves the API as a JSON object with an `error` field.
//! Portfolio failures also carry `items: []` so the UI can render an
//! empty list without special-casing.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::balances::{BalanceError, BalanceSnapshot};
use crate::transfer::TransferError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read as JSON.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Balance(#[from] BalanceError),

    /// The request outlived `server.request_timeout_secs`.
    #[error("request timed out after {0}s; a send may still have been broadcast, check the chain before retrying")]
    Timeout(u64),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Transfer(TransferError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Transfer(TransferError::NoWallet) => StatusCode::BAD_REQUEST,
            ApiError::Transfer(TransferError::Send { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Balance(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            ApiError::Balance(_) => {
                (status, Json(BalanceSnapshot::error_placeholder(&message))).into_response()
            }
            _ => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}
