use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type SdkResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    pub to: String,
    /// Whole native units, e.g. "0.25".
    pub amount_eth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price_gwei: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
}

pub struct WalletClient {
    client: Client,
    base_url: String,
}

impl WalletClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The wallet's address, or the server's fallback address.
    pub async fn address(&self) -> SdkResult<String> {
        let resp = self
            .client
            .get(format!("{}/api/address", self.base_url))
            .send()
            .await?;
        let body: AddressResponse = Self::check(resp).await?;
        Ok(body.address)
    }

    /// Token balances as returned by the balance API.
    ///
    /// Error bodies from the server are returned as values too, since they
    /// keep the same `{ error, items }` shape.
    pub async fn portfolio(&self, address: Option<&str>, chain: &str) -> SdkResult<Value> {
        let mut query = vec![("chain", chain)];
        if let Some(address) = address {
            query.push(("address", address));
        }
        let resp = self
            .client
            .get(format!("{}/api/portfolio", self.base_url))
            .query(&query)
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// Sign and broadcast a native transfer.
    pub async fn send(&self, req: &SendRequest) -> SdkResult<SendResponse> {
        let resp = self
            .client
            .post(format!("{}/api/send", self.base_url))
            .json(req)
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn check<T: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> SdkResult<T> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("wallet returned error status {}: {}", status, text).into());
        }
        Ok(serde_json::from_str(&text)?)
    }
}
