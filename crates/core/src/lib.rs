pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    chart::ChartFigure,
    column::{AssetTicker, Stablecoin},
    picker::DatePicker,
    settings::Settings,
    table::TimeSeriesTable,
};
use providers::registry::ProviderRegistry;
use services::{
    alignment_service, change_service, chart_service::ChartService, fetch_service::FetchService,
};
use std::collections::BTreeSet;

use errors::CoreError;

/// Market caps arrive in raw dollars; charts show billions.
const BILLIONS: f64 = 1e-9;

/// Main entry point for the dashboard core library.
/// Holds settings and the providers; every call to [`load_data`](Self::load_data)
/// goes back to the network.
#[must_use]
pub struct Dashboard {
    settings: Settings,
    fetch_service: FetchService,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("settings", &self.settings)
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl Dashboard {
    /// Dashboard backed by the default network providers.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let registry = ProviderRegistry::new_with_defaults(&settings)?;
        Ok(Self::with_registry(settings, registry))
    }

    /// Dashboard backed by explicit providers (tests, alternate sources).
    pub fn with_registry(settings: Settings, registry: ProviderRegistry) -> Self {
        Self {
            settings,
            fetch_service: FetchService::new(registry),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Names of the metrics and price providers in use.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.fetch_service.registry().provider_names()
    }

    /// Base-date picker for the TVL/price chart, relative to `today`.
    #[must_use]
    pub fn tvl_picker(&self, today: NaiveDate) -> DatePicker {
        DatePicker::new(
            self.settings.tvl_history_start,
            yesterday(today),
            self.settings.default_base_date,
        )
    }

    /// Base-date picker for the stablecoin chart, relative to `today`.
    #[must_use]
    pub fn stablecoin_picker(&self, today: NaiveDate) -> DatePicker {
        DatePicker::new(
            self.settings.stablecoin_history_start,
            yesterday(today),
            self.settings.default_base_date,
        )
    }

    /// Fetch and shape everything one page render needs.
    ///
    /// Sequential: TVL, then prices over the TVL date range, then the
    /// stablecoin identifiers and each tracked coin's market cap.
    pub async fn load_data(&self, today: NaiveDate) -> Result<DashboardData, CoreError> {
        let tvl = self.fetch_service.fetch_tvl_history().await?;
        let (start, end) = match (tvl.first_date(), tvl.last_date()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(CoreError::unavailable("historical TVL", "provider returned no rows")),
        };

        let assets: BTreeSet<AssetTicker> = AssetTicker::ALL.into_iter().collect();
        let prices = self
            .fetch_service
            .fetch_price_history(&assets, start, end)
            .await?;
        let tvl_prices = alignment_service::align_prices_with_tvl(&prices, &tvl)?;

        let identifiers = self.fetch_service.fetch_stablecoin_identifiers().await?;
        let mut per_coin = Vec::with_capacity(Stablecoin::ALL.len());
        for coin in Stablecoin::ALL {
            let id = identifiers.resolve(coin)?;
            let raw = self
                .fetch_service
                .fetch_stablecoin_mcap_history(coin, id)
                .await?;
            per_coin.push((coin, raw.scale(BILLIONS)));
        }
        let stablecoin_mcaps = alignment_service::combine_stablecoin_mcaps(per_coin)?;

        tracing::info!(
            tvl_price_rows = tvl_prices.len(),
            stablecoin_rows = stablecoin_mcaps.len(),
            "dashboard data loaded"
        );

        Ok(DashboardData {
            tvl_prices,
            stablecoin_mcaps,
            tvl_picker: self.tvl_picker(today),
            stablecoin_picker: self.stablecoin_picker(today),
            chart_service: ChartService::new(),
        })
    }
}

/// Application state for one render cycle: the two shaped tables plus the
/// pickers that bound user input. Read-only once built.
#[derive(Debug)]
pub struct DashboardData {
    /// BTC, ETH, TVL joined on date and forward-filled
    pub tvl_prices: TimeSeriesTable,
    /// USDT, USDC, BUSD and "All 3" market caps in billions
    pub stablecoin_mcaps: TimeSeriesTable,
    pub tvl_picker: DatePicker,
    pub stablecoin_picker: DatePicker,
    chart_service: ChartService,
}

impl DashboardData {
    /// Assemble state from already-shaped tables.
    pub fn new(
        tvl_prices: TimeSeriesTable,
        stablecoin_mcaps: TimeSeriesTable,
        tvl_picker: DatePicker,
        stablecoin_picker: DatePicker,
    ) -> Self {
        Self {
            tvl_prices,
            stablecoin_mcaps,
            tvl_picker,
            stablecoin_picker,
            chart_service: ChartService::new(),
        }
    }

    /// Percent change of TVL, ETH and BTC since `base_date`.
    ///
    /// A base date the picker allows but the data has not reached yet (the
    /// provider lags a day behind) snaps back to the last observation.
    pub fn tvl_price_chart(&self, base_date: NaiveDate) -> Result<ChartFigure, CoreError> {
        let base_date =
            snap_to_last_row(self.tvl_picker.validate(base_date)?, &self.tvl_prices);
        let change = change_service::percent_change_from_base(&self.tvl_prices, base_date)?;
        self.chart_service.tvl_price_chart(&change)
    }

    /// Dollar change (billions) of the stablecoin market caps since `base_date`.
    pub fn stablecoin_chart(&self, base_date: NaiveDate) -> Result<ChartFigure, CoreError> {
        let base_date = snap_to_last_row(
            self.stablecoin_picker.validate(base_date)?,
            &self.stablecoin_mcaps,
        );
        let change = change_service::absolute_change_from_base(&self.stablecoin_mcaps, base_date)?;
        self.chart_service.stablecoin_chart(&change)
    }
}

fn snap_to_last_row(base_date: NaiveDate, table: &TimeSeriesTable) -> NaiveDate {
    match table.last_date() {
        Some(last) if base_date > last => {
            tracing::debug!(%base_date, %last, "base date past last observation");
            last
        }
        _ => base_date,
    }
}

fn yesterday(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}
