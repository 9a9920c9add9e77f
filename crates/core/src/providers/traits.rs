use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::point::DataPoint;
use crate::models::stablecoin::StablecoinListing;

/// DeFi protocol metrics: total value locked and stablecoin supply.
///
/// Implemented by [`DefiLlamaProvider`](super::defillama::DefiLlamaProvider)
/// and by mocks in tests. Swapping the data source touches only the
/// implementation.
#[async_trait]
pub trait DefiMetricsProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Daily TVL summed across all chains, full available history.
    async fn get_historical_tvl(&self) -> Result<Vec<DataPoint>, CoreError>;

    /// Every stablecoin the provider knows about.
    async fn get_stablecoins(&self) -> Result<Vec<StablecoinListing>, CoreError>;

    /// Daily total circulating market cap of one stablecoin, in raw
    /// currency units (not scaled).
    async fn get_stablecoin_mcap_history(&self, id: &str) -> Result<Vec<DataPoint>, CoreError>;
}

/// Daily market prices for tradeable tickers.
#[async_trait]
pub trait MarketPriceProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Adjusted close for each trading day in `[from, to]` (inclusive),
    /// sorted by date. Missing trading days are simply absent.
    async fn get_adjusted_close_range(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DataPoint>, CoreError>;
}
