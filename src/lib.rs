//! Custodial EVM wallet backend library

pub mod balances;
pub mod blockchain;
pub mod config;
pub mod http;
pub mod keystore;
pub mod lifecycle;
pub mod observability;
pub mod transfer;

pub use config::WalletConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
