//! Balance snapshot and error types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Error text returned when no balance API key is configured.
pub const MISSING_API_KEY: &str = "missing api key";

/// Indexer response, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSnapshot(Value);

impl BalanceSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `{"error": <message>, "items": []}`.
    pub fn error_placeholder(message: &str) -> Self {
        Self(json!({ "error": message, "items": [] }))
    }

    /// Sentinel returned instead of calling the API without a key.
    pub fn missing_api_key() -> Self {
        Self::error_placeholder(MISSING_API_KEY)
    }

    /// The top-level `error` field, when it is present and non-null.
    ///
    /// Covalent reports `"error": false` on success, so `false` counts as
    /// no error as well.
    pub fn error(&self) -> Option<&Value> {
        self.0
            .get("error")
            .filter(|e| !e.is_null() && *e != &Value::Bool(false))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("invalid balance API URL: {0}")]
    InvalidUrl(String),

    #[error("balance API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("balance API returned a non-JSON body: {0}")]
    Decode(#[source] reqwest::Error),
}
