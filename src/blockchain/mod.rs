//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Keyfile (via keystore)
//!     → wallet.rs (key parsing, signing)
//!     → registry.rs (chain name → client)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (build, sign, raw bytes)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - Signing happens in-process; only signed bytes reach the RPC endpoint
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod registry;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::{ChainClient, ChainRpc};
pub use registry::ChainRegistry;
pub use transaction::{SignedTransfer, UnsignedTransfer, NATIVE_TRANSFER_GAS_LIMIT};
pub use types::{BlockchainError, BlockchainResult, ChainId, ChainTarget};
pub use wallet::Wallet;
