//! Wallet key material and transaction signing.
//!
//! # Security
//! - The private key is held only inside the signer; it is never logged and
//!   leaves the process only when the keystore persists it to the keyfile
//! - `Debug` output is limited to addresses

use alloy::consensus::TxLegacy;
use alloy::network::TxSignerSync;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signature;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A loaded signing key plus the address recorded alongside it.
#[derive(Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Address as recorded in the keyfile. Equal to the signer's address
    /// unless the keyfile was accepted without verification.
    address: Address,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        // Strip 0x prefix if present
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self {
            address: signer.address(),
            signer,
        })
    }

    /// Generate a fresh key from the operating system's CSPRNG.
    pub fn random() -> Self {
        let signer = PrivateKeySigner::random();
        Self {
            address: signer.address(),
            signer,
        }
    }

    /// Replace the reported address with the one recorded on disk.
    pub fn with_recorded_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// The wallet's reported address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The address derived from the private key. Nonces are read for this one.
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Whether the recorded address matches the private key.
    pub fn is_consistent(&self) -> bool {
        self.address == self.signer.address()
    }

    /// `0x`-prefixed hex of the private key, for writing the keyfile.
    pub(crate) fn private_key_hex(&self) -> String {
        format!("{:#x}", self.signer.to_bytes())
    }

    /// Sign a legacy transaction in place, applying EIP-155 with the
    /// transaction's own chain id.
    pub fn sign_transaction(&self, tx: &mut TxLegacy) -> BlockchainResult<Signature> {
        self.signer
            .sign_transaction_sync(tx)
            .map_err(|e| BlockchainError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("signer_address", &self.signer.address())
            .finish_non_exhaustive()
    }
}
