//! Chain client selection by chain name.

use std::sync::Arc;

use crate::blockchain::client::{ChainClient, ChainRpc};
use crate::blockchain::types::{BlockchainResult, ChainTarget};
use crate::config::ChainsConfig;

/// The two chain clients, fixed at process start.
#[derive(Clone)]
pub struct ChainRegistry {
    primary: Arc<dyn ChainRpc>,
    secondary: Arc<dyn ChainRpc>,
}

impl ChainRegistry {
    pub fn new(primary: Arc<dyn ChainRpc>, secondary: Arc<dyn ChainRpc>) -> Self {
        Self { primary, secondary }
    }

    /// Build HTTP clients for both configured endpoints.
    pub fn from_config(config: &ChainsConfig) -> BlockchainResult<Self> {
        let primary = ChainClient::new(&config.primary_rpc_url, config.rpc_timeout_secs)?;
        let secondary = ChainClient::new(&config.secondary_rpc_url, config.rpc_timeout_secs)?;

        tracing::info!(
            primary = %primary.rpc_url(),
            secondary = %secondary.rpc_url(),
            timeout_secs = config.rpc_timeout_secs,
            "Chain clients configured"
        );

        Ok(Self::new(Arc::new(primary), Arc::new(secondary)))
    }

    /// Client for a resolved target.
    pub fn client(&self, target: ChainTarget) -> Arc<dyn ChainRpc> {
        match target {
            ChainTarget::Primary => Arc::clone(&self.primary),
            ChainTarget::Secondary => Arc::clone(&self.secondary),
        }
    }

    /// Resolve a chain name (see [`ChainTarget::from_name`]) to its client.
    pub fn client_for(&self, chain: &str) -> (ChainTarget, Arc<dyn ChainRpc>) {
        let target = ChainTarget::from_name(chain);
        (target, self.client(target))
    }
}

impl std::fmt::Debug for ChainRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainRegistry").finish_non_exhaustive()
    }
}
