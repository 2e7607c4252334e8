//! Balance lookups through the external indexing API.
//!
//! The response body is treated as opaque JSON; the only field the wallet
//! looks at is the top-level `error`.

pub mod fetcher;
pub mod types;

pub use fetcher::BalanceFetcher;
pub use types::{BalanceError, BalanceSnapshot, MISSING_API_KEY};
