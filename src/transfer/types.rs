//! Transfer request and error types.

use std::fmt;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::blockchain::units::{gwei_to_wei, native_to_wei};
use crate::blockchain::BlockchainError;

/// Chain used when a request does not name one.
pub const DEFAULT_CHAIN: &str = "eth";

/// A transfer as received from a caller. Fields are optional so that
/// "missing" can be told apart from "malformed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Chain name; `base` selects the secondary chain, anything else the primary.
    pub chain: String,
    /// Recipient address.
    pub to: Option<String>,
    /// Amount in whole native units as decimal text (e.g. "0.25").
    pub amount: Option<String>,
    /// Gas price override in gwei as decimal text.
    pub gas_price_gwei: Option<String>,
}

impl Default for TransferRequest {
    fn default() -> Self {
        Self {
            chain: DEFAULT_CHAIN.to_string(),
            to: None,
            amount: None,
            gas_price_gwei: None,
        }
    }
}

impl TransferRequest {
    pub fn new(chain: impl Into<String>, to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            to: Some(to.into()),
            amount: Some(amount.into()),
            gas_price_gwei: None,
        }
    }

    pub fn with_gas_price_gwei(mut self, gwei: impl Into<String>) -> Self {
        self.gas_price_gwei = Some(gwei.into());
        self
    }

    /// Fail when `to` or `amount` is absent or blank. Nothing is parsed.
    pub fn check_present(&self) -> Result<(), TransferError> {
        self.required_fields().map(|_| ())
    }

    fn required_fields(&self) -> Result<(String, String), TransferError> {
        match (present(&self.to), present(&self.amount)) {
            (Some(to), Some(amount)) => Ok((to, amount)),
            _ => Err(TransferError::Validation(
                "missing 'to' or 'amount_eth'".to_string(),
            )),
        }
    }

    /// Check presence and parse every field. Touches no chain state.
    pub fn validate(&self) -> Result<ValidatedTransfer, TransferError> {
        let (to, amount) = self.required_fields()?;

        let to: Address = to.parse().map_err(|_| {
            TransferError::Validation(format!("invalid recipient address '{}'", to))
        })?;

        let value = native_to_wei(&amount)
            .map_err(|e| TransferError::Validation(format!("invalid amount: {}", e)))?;
        if value.is_zero() {
            return Err(TransferError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        let gas_price_override = present(&self.gas_price_gwei)
            .map(|gwei| gwei_to_wei(&gwei))
            .transpose()
            .map_err(|e| TransferError::Validation(format!("invalid gas price: {}", e)))?;

        Ok(ValidatedTransfer {
            to,
            value,
            gas_price_override,
        })
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A request whose fields have all been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransfer {
    pub to: Address,
    /// Value in wei.
    pub value: U256,
    /// Gas price in wei, when the caller chose one.
    pub gas_price_override: Option<u128>,
}

/// Pipeline step at which a send failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStage {
    Nonce,
    GasPrice,
    ChainId,
    Signing,
    Broadcast,
}

impl fmt::Display for SendStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SendStage::Nonce => "nonce lookup",
            SendStage::GasPrice => "gas price lookup",
            SendStage::ChainId => "chain id lookup",
            SendStage::Signing => "signing",
            SendStage::Broadcast => "broadcast",
        })
    }
}

#[derive(Debug, Error)]
pub enum TransferError {
    /// The request is missing or has malformed fields.
    #[error("{0}")]
    Validation(String),

    /// No usable local key.
    #[error("no local key found; generate or import one first")]
    NoWallet,

    /// The chain could not be queried or refused the transaction.
    #[error("{stage} failed: {source}")]
    Send {
        stage: SendStage,
        #[source]
        source: BlockchainError,
    },
}

impl TransferError {
    pub(crate) fn at(stage: SendStage) -> impl FnOnce(BlockchainError) -> Self {
        move |source| TransferError::Send { stage, source }
    }
}
