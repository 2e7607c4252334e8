//! Chain-specific types and error definitions.

use std::fmt;

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Which of the two configured chains a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainTarget {
    /// Ethereum mainnet (or whatever `chains.primary_rpc_url` points at).
    Primary,
    /// Base.
    Secondary,
}

impl ChainTarget {
    /// Resolve a user-supplied chain name.
    ///
    /// Case-insensitive: `"base"` selects the secondary chain, every other
    /// name (including unknown ones) selects the primary chain.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("base") {
            ChainTarget::Secondary
        } else {
            ChainTarget::Primary
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainTarget::Primary => "primary",
            ChainTarget::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ChainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Local signing failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The node refused the signed transaction.
    #[error("Broadcast rejected: {0}")]
    Rejected(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
