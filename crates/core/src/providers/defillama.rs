use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::DefiMetricsProvider;
use crate::errors::CoreError;
use crate::models::point::DataPoint;
use crate::models::settings::Settings;
use crate::models::stablecoin::StablecoinListing;

const PROVIDER: &str = "DefiLlama";

/// DefiLlama API provider for TVL and stablecoin supply.
///
/// - **Free**: No API key required.
/// - **Endpoints**:
///   - `{api}/v2/historicalChainTvl`: daily TVL across all chains
///   - `{stablecoins}/stablecoins?includePrices=true`: stablecoin listing
///   - `{stablecoins}/stablecoincharts/all?stablecoin={id}`: daily supply
///
/// All timestamps are unix seconds at midnight UTC.
pub struct DefiLlamaProvider {
    client: Client,
    api_url: String,
    stablecoins_url: String,
}

impl DefiLlamaProvider {
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_url: settings.defillama_api_url.trim_end_matches('/').to_string(),
            stablecoins_url: settings
                .defillama_stablecoins_url
                .trim_end_matches('/')
                .to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, CoreError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("{what} request failed with HTTP {status}"),
            });
        }
        let body = resp.text().await?;
        tracing::debug!(what, bytes = body.len(), "DefiLlama response received");
        Self::decode(&body)
    }

    /// Parse a response body. Malformed JSON is a
    /// [`CoreError::Deserialization`].
    pub fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, CoreError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl Default for DefiLlamaProvider {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

// ── DefiLlama API response types ────────────────────────────────────

/// One row of `/v2/historicalChainTvl`.
#[derive(Debug, Deserialize)]
pub struct TvlEntry {
    pub date: Timestamp,
    pub tvl: f64,
}

/// Body of `/stablecoins`.
#[derive(Debug, Deserialize)]
pub struct StablecoinsResponse {
    #[serde(rename = "peggedAssets")]
    pub pegged_assets: Vec<PeggedAsset>,
}

#[derive(Debug, Deserialize)]
pub struct PeggedAsset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// One row of `/stablecoincharts/all`.
#[derive(Debug, Deserialize)]
pub struct StablecoinChartEntry {
    pub date: Timestamp,
    /// Circulating supply valued in USD, keyed by peg type ("peggedUSD", ...)
    #[serde(rename = "totalCirculatingUSD", default)]
    pub total_circulating_usd: HashMap<String, f64>,
}

/// DefiLlama sends timestamps as numbers on some endpoints and as numeric
/// strings on others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Number(i64),
    Text(String),
}

impl Timestamp {
    pub fn seconds(&self) -> Option<i64> {
        match self {
            Timestamp::Number(n) => Some(*n),
            Timestamp::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl TvlEntry {
    pub fn to_point(&self) -> Option<DataPoint> {
        DataPoint::from_unix_seconds(self.date.seconds()?, self.tvl)
    }
}

impl StablecoinChartEntry {
    /// Total market cap summed over every peg type. `None` for rows with no
    /// supply data.
    pub fn to_point(&self) -> Option<DataPoint> {
        if self.total_circulating_usd.is_empty() {
            return None;
        }
        let total: f64 = self.total_circulating_usd.values().sum();
        DataPoint::from_unix_seconds(self.date.seconds()?, total)
    }
}

impl From<PeggedAsset> for StablecoinListing {
    fn from(a: PeggedAsset) -> Self {
        StablecoinListing {
            id: a.id,
            name: a.name,
            symbol: a.symbol,
        }
    }
}

#[async_trait]
impl DefiMetricsProvider for DefiLlamaProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_historical_tvl(&self) -> Result<Vec<DataPoint>, CoreError> {
        let url = format!("{}/v2/historicalChainTvl", self.api_url);
        let entries: Vec<TvlEntry> = self.get_json(&url, "historical TVL").await?;
        Ok(entries.iter().filter_map(TvlEntry::to_point).collect())
    }

    async fn get_stablecoins(&self) -> Result<Vec<StablecoinListing>, CoreError> {
        let url = format!("{}/stablecoins?includePrices=true", self.stablecoins_url);
        let resp: StablecoinsResponse = self.get_json(&url, "stablecoin listing").await?;
        Ok(resp.pegged_assets.into_iter().map(StablecoinListing::from).collect())
    }

    async fn get_stablecoin_mcap_history(&self, id: &str) -> Result<Vec<DataPoint>, CoreError> {
        let url = format!("{}/stablecoincharts/all?stablecoin={id}", self.stablecoins_url);
        let entries: Vec<StablecoinChartEntry> = self
            .get_json(&url, &format!("market cap history for stablecoin {id}"))
            .await?;
        Ok(entries.iter().filter_map(StablecoinChartEntry::to_point).collect())
    }
}
