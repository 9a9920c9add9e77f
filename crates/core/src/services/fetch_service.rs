use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::alignment_service::concat_columns;
use crate::errors::CoreError;
use crate::models::column::{AssetTicker, ColumnId, Stablecoin};
use crate::models::stablecoin::StablecoinIdentifierTable;
use crate::models::table::TimeSeriesTable;
use crate::providers::registry::ProviderRegistry;

/// Fetches raw series from the external providers and shapes them into
/// date-indexed tables.
///
/// No caching: every call goes to the network. Provider errors and empty
/// responses both surface as [`CoreError::DataUnavailable`].
pub struct FetchService {
    registry: ProviderRegistry,
}

impl FetchService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Daily all-chain TVL, one column [`ColumnId::Tvl`], full history.
    pub async fn fetch_tvl_history(&self) -> Result<TimeSeriesTable, CoreError> {
        let provider = self.registry.metrics();
        tracing::debug!(provider = provider.name(), "fetching historical TVL");

        let points = provider
            .get_historical_tvl()
            .await
            .map_err(|e| unavailable("historical TVL", e))?;

        let table = TimeSeriesTable::from_points(ColumnId::Tvl, points);
        if table.is_empty() {
            return Err(CoreError::unavailable("historical TVL", "provider returned no rows"));
        }
        tracing::info!(
            rows = table.len(),
            first = ?table.first_date(),
            last = ?table.last_date(),
            "fetched historical TVL"
        );
        Ok(table)
    }

    /// Daily adjusted close for each asset over `[start, end]`, one column
    /// per asset (BTC, ETH).
    ///
    /// Dates are the union over assets. A single failing asset leaves its
    /// column empty; only a total failure is an error.
    pub async fn fetch_price_history(
        &self,
        assets: &BTreeSet<AssetTicker>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeriesTable, CoreError> {
        if assets.is_empty() {
            return Err(CoreError::unavailable("price history", "no assets requested"));
        }
        if start > end {
            return Err(CoreError::unavailable(
                "price history",
                format!("start {start} is after end {end}"),
            ));
        }

        let provider = self.registry.prices();
        let mut tables = Vec::with_capacity(assets.len());
        let mut failed = Vec::new();
        let mut last_error = None;

        for asset in assets {
            tracing::debug!(provider = provider.name(), ticker = asset.ticker(), %start, %end, "fetching prices");
            match provider.get_adjusted_close_range(asset.ticker(), start, end).await {
                Ok(points) => tables.push(TimeSeriesTable::from_points(asset.column(), points)),
                Err(e) => {
                    tracing::warn!(ticker = asset.ticker(), error = %e, "price fetch failed");
                    failed.push(*asset);
                    last_error = Some(e);
                }
            }
        }

        if tables.iter().all(TimeSeriesTable::is_empty) {
            let reason = match last_error {
                Some(e) => e.to_string(),
                None => format!("no prices between {start} and {end}"),
            };
            return Err(CoreError::unavailable("price history", reason));
        }

        let mut table = concat_columns(&tables)?;
        for asset in failed {
            table.push_column(asset.column(), vec![None; table.len()])?;
        }
        tracing::info!(rows = table.len(), columns = ?table.column_ids(), "fetched price history");
        Ok(table)
    }

    /// Display name → identifier for every stablecoin the provider lists.
    pub async fn fetch_stablecoin_identifiers(
        &self,
    ) -> Result<StablecoinIdentifierTable, CoreError> {
        let listings = self
            .registry
            .metrics()
            .get_stablecoins()
            .await
            .map_err(|e| unavailable("stablecoin listing", e))?;

        let table = StablecoinIdentifierTable::from_listings(listings);
        if table.is_empty() {
            return Err(CoreError::unavailable("stablecoin listing", "provider returned no rows"));
        }
        tracing::debug!(count = table.len(), "fetched stablecoin identifiers");
        Ok(table)
    }

    /// Daily total circulating market cap of one stablecoin, raw currency
    /// units, in a single column named after `coin`. Callers scale to
    /// billions.
    pub async fn fetch_stablecoin_mcap_history(
        &self,
        coin: Stablecoin,
        identifier: &str,
    ) -> Result<TimeSeriesTable, CoreError> {
        let source = format!("{coin} market cap");
        let points = self
            .registry
            .metrics()
            .get_stablecoin_mcap_history(identifier)
            .await
            .map_err(|e| unavailable(&source, e))?;

        let table = TimeSeriesTable::from_points(coin.column(), points);
        if table.is_empty() {
            return Err(CoreError::unavailable(source, "provider returned no rows"));
        }
        tracing::debug!(coin = %coin, id = identifier, rows = table.len(), "fetched stablecoin market cap");
        Ok(table)
    }
}

/// Provider failures become `DataUnavailable`; ones that already are pass through.
fn unavailable(source_name: &str, e: CoreError) -> CoreError {
    match e {
        CoreError::DataUnavailable { .. } => e,
        other => CoreError::unavailable(source_name, other),
    }
}
