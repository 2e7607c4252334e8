//! Native transfer pipeline: validate, load key, build, sign, broadcast.

use std::sync::Arc;

use alloy::primitives::TxHash;

use crate::blockchain::{ChainRegistry, ChainRpc, UnsignedTransfer, Wallet};
use crate::config::TransferConfig;
use crate::keystore::KeyStore;
use crate::observability::metrics;
use crate::transfer::locks::AddressLocks;
use crate::transfer::types::{SendStage, TransferError, TransferRequest, ValidatedTransfer};

/// Builds, signs and submits native-asset transfers from the local wallet.
///
/// Every send reads the nonce fresh from the chain; nothing is cached or
/// persisted between sends. Without per-address serialization, two sends
/// from the same address that overlap between nonce lookup and broadcast
/// will use the same nonce and one of them will be rejected by the node.
#[derive(Clone)]
pub struct TransferService {
    keystore: Arc<dyn KeyStore>,
    chains: ChainRegistry,
    locks: Option<AddressLocks>,
}

impl TransferService {
    pub fn new(keystore: Arc<dyn KeyStore>, chains: ChainRegistry, config: &TransferConfig) -> Self {
        Self {
            keystore,
            chains,
            locks: config.serialize_per_address.then(AddressLocks::new),
        }
    }

    /// Send `request.amount` of the native asset to `request.to`.
    ///
    /// Returns the transaction hash reported by the node.
    pub async fn send(&self, request: TransferRequest) -> Result<TxHash, TransferError> {
        request.check_present()?;
        let wallet = self.keystore.load_wallet().ok_or(TransferError::NoWallet)?;
        let transfer = request.validate()?;
        let (target, client) = self.chains.client_for(&request.chain);

        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(target, wallet.signer_address()).await),
            None => None,
        };

        let result = submit(client.as_ref(), &wallet, &transfer).await;
        metrics::record_send(target.as_str(), result.is_ok());

        match &result {
            Ok(hash) => tracing::info!(
                chain = %target,
                from = %wallet.signer_address(),
                to = %transfer.to,
                value_wei = %transfer.value,
                tx_hash = %hash,
                "Transfer broadcast"
            ),
            Err(e) => tracing::warn!(
                chain = %target,
                from = %wallet.signer_address(),
                to = %transfer.to,
                error = %e,
                "Transfer failed"
            ),
        }
        result
    }
}

async fn submit(
    client: &dyn ChainRpc,
    wallet: &Wallet,
    transfer: &ValidatedTransfer,
) -> Result<TxHash, TransferError> {
    let nonce = client
        .transaction_count(wallet.signer_address())
        .await
        .map_err(TransferError::at(SendStage::Nonce))?;

    let gas_price = match transfer.gas_price_override {
        Some(price) => price,
        None => client
            .gas_price()
            .await
            .map_err(TransferError::at(SendStage::GasPrice))?,
    };

    let chain_id = client
        .chain_id()
        .await
        .map_err(TransferError::at(SendStage::ChainId))?;

    let signed = UnsignedTransfer::new(nonce, transfer.to, transfer.value, gas_price, chain_id.0)
        .sign(wallet)
        .map_err(TransferError::at(SendStage::Signing))?;

    tracing::debug!(nonce, gas_price, chain_id = chain_id.0, "Signed transfer");

    let hash = client
        .send_raw_transaction(signed.raw)
        .await
        .map_err(TransferError::at(SendStage::Broadcast))?;

    if hash != signed.hash {
        tracing::warn!(local = %signed.hash, remote = %hash, "Node reported a different transaction hash");
    }
    Ok(hash)
}

impl std::fmt::Debug for TransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferService")
            .field("serialize_per_address", &self.locks.is_some())
            .finish_non_exhaustive()
    }
}
