//! API handlers.
//!
//! | Method | Path             | Response                         |
//! |--------|------------------|----------------------------------|
//! | GET    | `/api/address`   | `{ "address": "0x…" }`           |
//! | GET    | `/api/portfolio` | balance API JSON, passed through |
//! | POST   | `/api/send`      | `{ "tx_hash": "0x…" }`           |
//! | GET    | `/health`        | `{ "status": "ok", … }`          |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::balances::BalanceSnapshot;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::keystore::active_address;
use crate::transfer::{TransferRequest, DEFAULT_CHAIN};

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub address: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PortfolioQuery {
    pub address: Option<String>,
    pub chain: Option<String>,
}

/// Body of `POST /api/send`. Amounts may be JSON numbers or strings.
#[derive(Debug, Default, Deserialize)]
pub struct SendBody {
    pub chain: Option<String>,
    pub to: Option<String>,
    pub amount_eth: Option<DecimalInput>,
    pub gas_price_gwei: Option<DecimalInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(serde_json::Number),
    Text(String),
}

impl DecimalInput {
    /// Decimal text for exact parsing. `f64` display never uses exponents.
    pub fn into_decimal_string(self) -> String {
        match self {
            DecimalInput::Text(s) => s,
            DecimalInput::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
                (Some(u), _, _) => u.to_string(),
                (None, Some(i), _) => i.to_string(),
                (None, None, Some(f)) => f.to_string(),
                _ => n.to_string(),
            },
        }
    }
}

impl From<SendBody> for TransferRequest {
    fn from(body: SendBody) -> Self {
        TransferRequest {
            chain: body
                .chain
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CHAIN.to_string()),
            to: body.to,
            amount: body.amount_eth.map(DecimalInput::into_decimal_string),
            gas_price_gwei: body.gas_price_gwei.map(DecimalInput::into_decimal_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendResponse {
    pub tx_hash: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub wallet_loaded: bool,
}

pub async fn get_address(State(state): State<AppState>) -> Json<AddressResponse> {
    let address = active_address(state.keystore.as_ref(), state.default_address);
    Json(AddressResponse {
        address: address.to_checksum(None),
    })
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<BalanceSnapshot>, ApiError> {
    let address = match query.address.filter(|a| !a.trim().is_empty()) {
        Some(address) => address,
        None => active_address(state.keystore.as_ref(), state.default_address).to_checksum(None),
    };
    let chain = query
        .chain
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CHAIN.to_string());

    let snapshot = state.balances.fetch_balances(&address, &chain).await?;
    Ok(Json(snapshot))
}

pub async fn post_send(
    State(state): State<AppState>,
    payload: Result<Json<SendBody>, JsonRejection>,
) -> Result<Json<SendResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let tx_hash = state.transfers.send(body.into()).await?;
    Ok(Json(SendResponse {
        tx_hash: format!("{tx_hash:#x}"),
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        wallet_loaded: state.keystore.load_wallet().is_some(),
    })
}
