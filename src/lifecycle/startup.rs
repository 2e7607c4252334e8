//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the key store and, when configured, make sure a wallet exists
//! - Build the chain clients and the balance fetcher
//! - Assemble the shared [`AppState`]

use std::sync::Arc;

use thiserror::Error;

use crate::balances::{BalanceError, BalanceFetcher};
use crate::blockchain::{BlockchainError, ChainRegistry};
use crate::config::WalletConfig;
use crate::http::AppState;
use crate::keystore::{FileKeyStore, KeyStore, KeyStoreError};
use crate::transfer::TransferService;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("key store: {0}")]
    KeyStore(#[from] KeyStoreError),

    #[error("chain client: {0}")]
    Chain(#[from] BlockchainError),

    #[error("balance client: {0}")]
    Balances(#[from] BalanceError),
}

/// Build the application state described by `config`.
pub fn build_state(config: &WalletConfig) -> Result<AppState, StartupError> {
    let keystore: Arc<dyn KeyStore> = Arc::new(FileKeyStore::from_config(&config.wallet));

    if config.wallet.create_on_startup {
        let wallet = keystore.ensure_wallet()?;
        tracing::info!(address = %wallet.address(), "Wallet ready");
    } else if keystore.load_wallet().is_none() {
        tracing::warn!(
            fallback = %config.wallet.default_address,
            "No local wallet; sends will be refused"
        );
    }

    let chains = ChainRegistry::from_config(&config.chains)?;
    let balances = BalanceFetcher::new(config.balances.clone())?;
    if !balances.has_api_key() {
        tracing::warn!("No balance API key configured; portfolio requests return a placeholder");
    }

    let transfers = TransferService::new(keystore.clone(), chains, &config.transfers);

    Ok(AppState {
        keystore,
        default_address: config.wallet.default_address,
        balances,
        transfers,
    })
}
