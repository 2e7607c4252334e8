//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to one JSON-RPC endpoint per chain
//! - Query the state a transfer needs (chain id, nonce, gas price)
//! - Broadcast signed transactions
//! - Bound every call with the configured timeout

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};

/// The chain operations a transfer needs.
///
/// Implemented over HTTP JSON-RPC by [`ChainClient`]; tests substitute their
/// own implementation to control the nonce source.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Numeric chain id, fetched live.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Transaction count (next nonce) of `address` at the latest block.
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64>;

    /// The node's suggested gas price in wei.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// Submit a signed, RLP-encoded transaction.
    async fn send_raw_transaction(&self, raw: Bytes) -> BlockchainResult<TxHash>;
}

/// Blockchain RPC client wrapper for a single endpoint.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a client for `rpc_url`.
    ///
    /// No request is made here; an unreachable endpoint surfaces as an error
    /// on the first call.
    pub fn new(rpc_url: &str, timeout_secs: u64) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e))
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(url))
            as Arc<dyn Provider + Send + Sync>;

        Ok(Self {
            provider,
            rpc_url: rpc_url.to_string(),
            timeout_duration: Duration::from_secs(timeout_secs),
        })
    }

    async fn bounded<F, T, E>(&self, call: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(rpc_url = %self.rpc_url, call, error = %e, "RPC error");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(rpc_url = %self.rpc_url, call, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl ChainRpc for ChainClient {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.bounded("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.bounded(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.bounded("eth_gasPrice", self.provider.get_gas_price()).await
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> BlockchainResult<TxHash> {
        match timeout(self.timeout_duration, self.provider.send_raw_transaction(&raw)).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => {
                tracing::warn!(rpc_url = %self.rpc_url, error = %e, "Broadcast rejected");
                Err(BlockchainError::Rejected(e.to_string()))
            }
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        }
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
