//! Local key storage.
//!
//! One keypair per device, held in a single JSON keyfile. The keystore is the
//! only source of signing authority; everything else receives a [`Wallet`]
//! from it.
//!
//! # Limitations
//! - The private key is stored unencrypted (see [`file`])
//! - Keyfile access is not locked; two first-run processes racing to create
//!   a wallet leave whichever file was written last

pub mod file;
pub mod keyfile;

use std::path::PathBuf;

use alloy::primitives::Address;
use thiserror::Error;

use crate::blockchain::Wallet;

pub use file::FileKeyStore;
pub use keyfile::Keyfile;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("failed to write keyfile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize keyfile: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("keyfile {0} exists but could not be loaded; refusing to replace it")]
    KeyfileUnusable(PathBuf),

    #[error("no keyfile location is writable")]
    NoWritableLocation,
}

/// Capability interface over wherever the signing key lives.
pub trait KeyStore: Send + Sync {
    /// The stored wallet, or `None` when absent or unusable. Never fails.
    fn load_wallet(&self) -> Option<Wallet>;

    /// The stored wallet, creating and persisting a new one if none exists.
    fn ensure_wallet(&self) -> Result<Wallet, KeyStoreError>;
}

/// Address to display: the local wallet's, else the configured fallback.
pub fn active_address(store: &dyn KeyStore, fallback: Address) -> Address {
    store
        .load_wallet()
        .map(|wallet| wallet.address())
        .unwrap_or(fallback)
}
