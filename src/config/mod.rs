//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (DEFAULT_ADDRESS, COVALENT_KEY, ETH_RPC, BASE_RPC)
//!     → validation.rs (semantic checks)
//!     → WalletConfig (validated, immutable)
//!     → each component receives its own section at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::WalletConfig;
pub use schema::{
    BalanceConfig, ChainsConfig, KeystoreConfig, LogFormat, ObservabilityConfig, ServerConfig,
    TlsConfig, TransferConfig,
};
