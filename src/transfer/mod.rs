//! Native-asset transfers.
//!
//! # Data Flow
//! ```text
//! TransferRequest
//!     → types.rs (presence check)
//!     → keystore (load wallet)
//!     → types.rs (parse recipient, amount, gas price; no chain access)
//!     → blockchain registry (chain name → client)
//!     → locks.rs (optional per-address exclusion)
//!     → nonce, gas price, chain id → sign → broadcast
//!     → tx hash | TransferError
//! ```
//!
//! Failures are returned, never retried. A transaction is either signed and
//! submitted or not sent at all; no pending state is kept.

pub mod locks;
pub mod service;
pub mod types;

pub use locks::AddressLocks;
pub use service::TransferService;
pub use types::{SendStage, TransferError, TransferRequest, ValidatedTransfer, DEFAULT_CHAIN};
