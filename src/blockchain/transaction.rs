//! Native-asset transfer construction and signing.
//!
//! # Responsibilities
//! - Build plain value transfers with the fixed 21000 gas limit
//! - Sign them locally as EIP-155 legacy transactions
//! - Produce the raw bytes and hash used for broadcast

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};

use crate::blockchain::types::BlockchainResult;
use crate::blockchain::wallet::Wallet;

/// Intrinsic gas of a transfer without calldata. Contract calls need more
/// and are not supported by this pipeline.
pub const NATIVE_TRANSFER_GAS_LIMIT: u64 = 21_000;

/// An unsigned native transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransfer {
    pub nonce: u64,
    pub to: Address,
    /// Value in wei.
    pub value: U256,
    pub gas_limit: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    pub chain_id: u64,
}

impl UnsignedTransfer {
    /// Build a transfer with the fixed native-transfer gas limit.
    pub fn new(nonce: u64, to: Address, value: U256, gas_price: u128, chain_id: u64) -> Self {
        Self {
            nonce,
            to,
            value,
            gas_limit: NATIVE_TRANSFER_GAS_LIMIT,
            gas_price,
            chain_id,
        }
    }

    fn into_legacy(self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: Bytes::new(),
        }
    }

    /// Sign with `wallet`, producing broadcast-ready bytes.
    pub fn sign(self, wallet: &Wallet) -> BlockchainResult<SignedTransfer> {
        let nonce = self.nonce;
        let mut tx = self.into_legacy();
        let signature = wallet.sign_transaction(&mut tx)?;

        let envelope = TxEnvelope::from(tx.into_signed(signature));
        let hash = *envelope.tx_hash();
        let raw = Bytes::from(envelope.encoded_2718());

        Ok(SignedTransfer { nonce, hash, raw })
    }
}

/// A signed transfer; exists only for the duration of one send.
#[derive(Debug, Clone)]
pub struct SignedTransfer {
    pub nonce: u64,
    pub hash: TxHash,
    /// RLP-encoded signed transaction.
    pub raw: Bytes,
}
