//! Per-address send serialization.

use std::sync::Arc;

use alloy::primitives::Address;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::blockchain::ChainTarget;

/// One async mutex per (chain, sender). Holding the guard from nonce lookup
/// through broadcast gives concurrent sends distinct nonces.
#[derive(Debug, Default, Clone)]
pub struct AddressLocks {
    inner: Arc<DashMap<(ChainTarget, Address), Arc<Mutex<()>>>>,
}

impl AddressLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `address` on `target`.
    pub async fn acquire(&self, target: ChainTarget, address: Address) -> OwnedMutexGuard<()> {
        let mutex = self.inner.entry((target, address)).or_default().clone();
        mutex.lock_owned().await
    }
}
