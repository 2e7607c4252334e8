//! On-disk keyfile format.

use serde::{Deserialize, Serialize};

use crate::blockchain::Wallet;

/// `{"address": "0x…", "private_key": "0x…"}`, stored unencrypted.
///
/// There is no schema version; unknown fields are ignored on read.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyfile {
    /// EIP-55 checksum address.
    pub address: String,
    /// Hex private key, `0x`-prefixed when written by this program.
    pub private_key: String,
}

impl Keyfile {
    /// Serialize a wallet's key material.
    pub fn from_wallet(wallet: &Wallet) -> Self {
        Self {
            address: wallet.address().to_checksum(None),
            private_key: wallet.private_key_hex(),
        }
    }
}

impl std::fmt::Debug for Keyfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyfile")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
