//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check RPC and API endpoints are well-formed URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WalletConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::WalletConfig;

/// Sequential RPC calls in one send: nonce, gas price, chain id, broadcast.
pub const RPC_CALLS_PER_SEND: u64 = 4;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `chains.primary_rpc_url`).
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration, collecting every problem.
pub fn validate_config(config: &WalletConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be > 0"));
    }

    if config.wallet.key_paths.is_empty() {
        errors.push(ValidationError::new(
            "wallet.key_paths",
            "at least one keyfile location is required",
        ));
    }

    check_url(&mut errors, "chains.primary_rpc_url", &config.chains.primary_rpc_url);
    check_url(&mut errors, "chains.secondary_rpc_url", &config.chains.secondary_rpc_url);
    if config.chains.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chains.rpc_timeout_secs", "must be > 0"));
    }

    check_url(&mut errors, "balances.base_url", &config.balances.base_url);
    if config.balances.timeout_secs == 0 {
        errors.push(ValidationError::new("balances.timeout_secs", "must be > 0"));
    }

    // The deadline must outlast every call a request can make.
    let request_secs = config.server.request_timeout_secs;
    let send_budget = config.chains.rpc_timeout_secs.saturating_mul(RPC_CALLS_PER_SEND);
    if request_secs > 0 && request_secs <= send_budget {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            format!(
                "{}s does not cover {} RPC calls of up to {}s each",
                request_secs, RPC_CALLS_PER_SEND, config.chains.rpc_timeout_secs
            ),
        ));
    }
    if request_secs > 0 && request_secs <= config.balances.timeout_secs {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            format!(
                "{}s does not cover the {}s balance API timeout",
                request_secs, config.balances.timeout_secs
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
