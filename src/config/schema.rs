//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wallet
//! backend. All types derive Serde traits for deserialization from config files.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder shipped in sample environments in place of a real Covalent key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_COVALENT_KEY";

/// Root configuration for the wallet backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Local key material settings.
    pub wallet: KeystoreConfig,

    /// RPC endpoints for the two supported chains.
    pub chains: ChainsConfig,

    /// Balance indexing API settings.
    pub balances: BalanceConfig,

    /// Transfer pipeline settings.
    pub transfers: TransferConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Total time allowed for a single request in seconds. Must exceed four
    /// RPC timeouts (one send) and the balance API timeout.
    pub request_timeout_secs: u64,

    /// Directory with the bundled web UI, served for unmatched paths.
    pub static_dir: Option<PathBuf>,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            request_timeout_secs: 150,
            static_dir: None,
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

/// Keyfile location and handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeystoreConfig {
    /// Address reported when no local key exists (read-only display).
    pub default_address: Address,

    /// Candidate keyfile locations, highest priority first.
    pub key_paths: Vec<PathBuf>,

    /// Reject keyfiles whose stored address does not match the private key.
    pub verify_address_on_load: bool,

    /// Generate a keyfile at startup when none exists.
    pub create_on_startup: bool,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            default_address: Address::ZERO,
            key_paths: vec![
                PathBuf::from("/storage/emulated/0/Download/omniwallet_key.json"),
                PathBuf::from("./omniwallet_key.json"),
            ],
            verify_address_on_load: true,
            create_on_startup: true,
        }
    }
}

/// RPC endpoints. The primary chain is Ethereum mainnet, the secondary is Base.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainsConfig {
    /// JSON-RPC endpoint URL for the primary chain.
    pub primary_rpc_url: String,

    /// JSON-RPC endpoint URL for the secondary chain.
    pub secondary_rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainsConfig {
    fn default() -> Self {
        Self {
            primary_rpc_url: "http://localhost:8545".to_string(),
            secondary_rpc_url: "https://mainnet.base.org".to_string(),
            rpc_timeout_secs: 30,
        }
    }
}

/// Covalent balance API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// API key. Absent, empty, or the placeholder value means "not configured".
    pub api_key: Option<String>,

    /// API base URL, without trailing slash.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Provider network id used for the `eth` / `ethereum` aliases.
    pub primary_network: String,

    /// Provider network id used for the `base` alias.
    pub secondary_network: String,
}

impl BalanceConfig {
    /// The API key, if one is actually configured.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.covalenthq.com/v1".to_string(),
            timeout_secs: 30,
            primary_network: "eth-mainnet".to_string(),
            secondary_network: "base-mainnet".to_string(),
        }
    }
}

/// Transfer pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Hold a per-(chain, address) lock from nonce lookup through broadcast.
    ///
    /// When disabled, concurrent sends from the same address can read the
    /// same nonce and one of the two transactions will be rejected.
    pub serialize_per_address: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            serialize_per_address: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "omniwallet=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
