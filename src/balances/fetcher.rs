//! Covalent `balances_v2` client.

use std::time::Duration;

use url::Url;

use crate::balances::types::{BalanceError, BalanceSnapshot};
use crate::config::BalanceConfig;
use crate::observability::metrics;

/// Fetches token balances for an address from the indexing API.
#[derive(Debug, Clone)]
pub struct BalanceFetcher {
    client: reqwest::Client,
    config: BalanceConfig,
}

impl BalanceFetcher {
    pub fn new(config: BalanceConfig) -> Result<Self, BalanceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(BalanceError::Request)?;
        Ok(Self { client, config })
    }

    /// Map a short chain alias to the provider's network id.
    ///
    /// `eth` / `ethereum` and `base` are recognized case-insensitively; any
    /// other value is passed through unchanged.
    pub fn network_for(&self, chain: &str) -> String {
        match chain.trim().to_ascii_lowercase().as_str() {
            "eth" | "ethereum" => self.config.primary_network.clone(),
            "base" => self.config.secondary_network.clone(),
            _ => chain.to_string(),
        }
    }

    /// Bounded metric label for a chain alias: `eth`, `base` or `other`.
    pub fn chain_label(chain: &str) -> &'static str {
        match chain.trim().to_ascii_lowercase().as_str() {
            "eth" | "ethereum" => "eth",
            "base" => "base",
            _ => "other",
        }
    }

    /// Whether a usable API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.config.effective_api_key().is_some()
    }

    fn balances_url(&self, network: &str, address: &str, key: &str) -> Result<Url, BalanceError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| BalanceError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BalanceError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend([network, "address", address, "balances_v2", ""]);
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }

    /// Fetch balances of `address` on `chain`.
    ///
    /// Without an API key this returns the missing-key placeholder and makes
    /// no request. Otherwise the response body is returned verbatim,
    /// whatever its HTTP status.
    pub async fn fetch_balances(
        &self,
        address: &str,
        chain: &str,
    ) -> Result<BalanceSnapshot, BalanceError> {
        let Some(key) = self.config.effective_api_key() else {
            tracing::debug!(%address, %chain, "No balance API key configured, skipping fetch");
            return Ok(BalanceSnapshot::missing_api_key());
        };

        let network = self.network_for(chain);
        let url = self.balances_url(&network, address, key)?;

        tracing::debug!(%address, %network, "Fetching balances");
        let result = async {
            let response = self.client.get(url).send().await.map_err(BalanceError::Request)?;
            let status = response.status();
            let body: serde_json::Value = response.json().await.map_err(BalanceError::Decode)?;
            if !status.is_success() {
                tracing::warn!(%network, %status, "Balance API returned an error status");
            }
            Ok::<_, BalanceError>(BalanceSnapshot::new(body))
        }
        .await;

        let succeeded = match &result {
            Ok(snapshot) => snapshot.error().is_none(),
            Err(_) => false,
        };
        metrics::record_balance_fetch(Self::chain_label(chain), succeeded);
        result
    }
}
