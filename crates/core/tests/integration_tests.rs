use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use defi_dashboard_core::errors::CoreError;
use defi_dashboard_core::models::column::ColumnId;
use defi_dashboard_core::models::point::DataPoint;
use defi_dashboard_core::models::settings::Settings;
use defi_dashboard_core::models::stablecoin::StablecoinListing;
use defi_dashboard_core::providers::registry::ProviderRegistry;
use defi_dashboard_core::providers::traits::{DefiMetricsProvider, MarketPriceProvider};
use defi_dashboard_core::Dashboard;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn points(rows: &[(NaiveDate, f64)]) -> Vec<DataPoint> {
    rows.iter().map(|(d, v)| DataPoint::new(*d, *v)).collect()
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-6)
}

// ═══════════════════════════════════════════════════════════════════
// Mock Providers (for testing without real API calls)
// ═══════════════════════════════════════════════════════════════════

struct MockMetrics {
    tvl: Vec<DataPoint>,
    listings: Vec<StablecoinListing>,
    mcaps: HashMap<String, Vec<DataPoint>>,
    tvl_down: bool,
}

impl MockMetrics {
    fn new() -> Self {
        let tvl = points(&[
            (d(2021, 12, 30), 90.0),
            (d(2021, 12, 31), 95.0),
            (d(2022, 1, 1), 100.0),
            (d(2022, 1, 2), 120.0),
            (d(2022, 1, 3), 90.0),
        ]);

        let listings = vec![
            listing("1", "Tether", "USDT"),
            listing("2", "USD Coin", "USDC"),
            listing("4", "Binance USD", "BUSD"),
            listing("5", "Dai", "DAI"),
        ];

        let mut mcaps = HashMap::new();
        mcaps.insert(
            "1".to_string(),
            points(&[
                (d(2021, 12, 31), 78.0e9),
                (d(2022, 1, 1), 78.5e9),
                (d(2022, 1, 2), 79.0e9),
            ]),
        );
        mcaps.insert(
            "2".to_string(),
            points(&[
                (d(2021, 12, 31), 42.0e9),
                (d(2022, 1, 1), 42.0e9),
                (d(2022, 1, 2), 44.5e9),
            ]),
        );
        mcaps.insert(
            "4".to_string(),
            points(&[
                (d(2021, 12, 31), 14.0e9),
                (d(2022, 1, 1), 14.5e9),
                (d(2022, 1, 2), 13.5e9),
            ]),
        );

        Self {
            tvl,
            listings,
            mcaps,
            tvl_down: false,
        }
    }
}

fn listing(id: &str, name: &str, symbol: &str) -> StablecoinListing {
    StablecoinListing {
        id: id.into(),
        name: name.into(),
        symbol: symbol.into(),
    }
}

#[async_trait]
impl DefiMetricsProvider for MockMetrics {
    fn name(&self) -> &str {
        "MockMetrics"
    }

    async fn get_historical_tvl(&self) -> Result<Vec<DataPoint>, CoreError> {
        if self.tvl_down {
            return Err(CoreError::Api {
                provider: "MockMetrics".into(),
                message: "HTTP 503".into(),
            });
        }
        Ok(self.tvl.clone())
    }

    async fn get_stablecoins(&self) -> Result<Vec<StablecoinListing>, CoreError> {
        Ok(self.listings.clone())
    }

    async fn get_stablecoin_mcap_history(&self, id: &str) -> Result<Vec<DataPoint>, CoreError> {
        Ok(self.mcaps.get(id).cloned().unwrap_or_default())
    }
}

struct MockPrices {
    prices: HashMap<String, Vec<DataPoint>>,
}

impl MockPrices {
    fn new() -> Self {
        let mut prices = HashMap::new();
        // Prices trade every day; one ETH close is missing on 2022-01-02.
        prices.insert(
            "BTC-USD".to_string(),
            points(&[
                (d(2021, 12, 30), 47000.0),
                (d(2021, 12, 31), 46000.0),
                (d(2022, 1, 1), 50000.0),
                (d(2022, 1, 2), 55000.0),
                (d(2022, 1, 3), 60000.0),
            ]),
        );
        prices.insert(
            "ETH-USD".to_string(),
            points(&[
                (d(2021, 12, 30), 3600.0),
                (d(2021, 12, 31), 3700.0),
                (d(2022, 1, 1), 4000.0),
                (d(2022, 1, 3), 3000.0),
            ]),
        );
        Self { prices }
    }
}

#[async_trait]
impl MarketPriceProvider for MockPrices {
    fn name(&self) -> &str {
        "MockPrices"
    }

    async fn get_adjusted_close_range(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DataPoint>, CoreError> {
        Ok(self
            .prices
            .get(ticker)
            .map(|pts| {
                pts.iter()
                    .filter(|p| p.date >= from && p.date <= to)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn dashboard(metrics: MockMetrics) -> Dashboard {
    Dashboard::with_registry(
        Settings::default(),
        ProviderRegistry::new(Box::new(metrics), Box::new(MockPrices::new())),
    )
}

// ═══════════════════════════════════════════════════════════════════
// Integration: full data load
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn load_data_shapes_both_tables() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 4)).await.unwrap();

    // TVL/price table: BTC, ETH, TVL over the shared dates, ETH gap filled
    assert_eq!(
        data.tvl_prices.column_ids(),
        vec![ColumnId::Btc, ColumnId::Eth, ColumnId::Tvl]
    );
    assert_eq!(data.tvl_prices.len(), 5);
    assert_eq!(data.tvl_prices.value(ColumnId::Eth, d(2022, 1, 2)), Some(4000.0));

    // Stablecoin table in billions with the "All 3" total
    assert_eq!(
        data.stablecoin_mcaps.column_ids(),
        vec![ColumnId::Usdt, ColumnId::Usdc, ColumnId::Busd, ColumnId::AllThree]
    );
    assert!(approx(data.stablecoin_mcaps.value(ColumnId::Usdt, d(2021, 12, 31)), 78.0));
    assert!(approx(
        data.stablecoin_mcaps.value(ColumnId::AllThree, d(2022, 1, 2)),
        79.0 + 44.5 + 13.5
    ));
}

#[tokio::test]
async fn load_data_builds_pickers_from_settings_and_today() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 4)).await.unwrap();

    assert_eq!(data.tvl_picker.min, d(2018, 8, 16));
    assert_eq!(data.tvl_picker.max, d(2022, 1, 3));
    assert_eq!(data.tvl_picker.default, d(2022, 1, 1));
    assert_eq!(data.stablecoin_picker.min, d(2020, 12, 31));
    assert_eq!(data.stablecoin_picker.max, d(2022, 1, 3));
}

#[tokio::test]
async fn tvl_price_chart_from_default_base_date() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 4)).await.unwrap();

    let fig = data.tvl_price_chart(data.tvl_picker.default).unwrap();
    let tvl = fig.trace("TVL").unwrap();
    assert_eq!(tvl.x, vec![d(2022, 1, 1), d(2022, 1, 2), d(2022, 1, 3)]);
    assert!(approx(tvl.y[0], 0.0));
    assert!(approx(tvl.y[1], 0.2));
    assert!(approx(tvl.y[2], -0.1));

    let btc = fig.trace("BTC").unwrap();
    assert!(approx(btc.y[2], 0.2));
    let eth = fig.trace("ETH").unwrap();
    assert!(approx(eth.y[1], 0.0));
    assert!(approx(eth.y[2], -0.25));
}

#[tokio::test]
async fn stablecoin_chart_reports_billions_since_base() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 4)).await.unwrap();

    let fig = data.stablecoin_chart(d(2021, 12, 31)).unwrap();
    let all = fig.trace("All 3").unwrap();
    assert!(approx(all.y[0], 0.0));
    assert!(approx(all.y[1], 1.0));
    assert!(approx(all.y[2], 3.0));
    assert!(approx(fig.trace("USDC").unwrap().y[2], 2.5));
    assert!(approx(fig.trace("BUSD").unwrap().y[2], -0.5));
}

#[tokio::test]
async fn base_date_outside_picker_is_rejected() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 4)).await.unwrap();

    let err = data.tvl_price_chart(d(2017, 1, 1)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidDateSelection { .. }));
    let err = data.stablecoin_chart(d(2022, 1, 4)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidDateSelection { .. }));
}

#[tokio::test]
async fn base_date_after_last_observation_snaps_to_last_row() {
    // Picker allows up to yesterday, but the providers lag behind.
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 10)).await.unwrap();
    let base = data.tvl_picker.clamp(d(2022, 1, 9));
    assert_eq!(base, d(2022, 1, 9));

    let fig = data.tvl_price_chart(base).unwrap();
    for trace in &fig.traces {
        assert_eq!(trace.x, vec![d(2022, 1, 3)]);
        assert!(approx(trace.y[0], 0.0), "{}", trace.name);
    }

    let fig = data.stablecoin_chart(data.stablecoin_picker.clamp(d(2022, 1, 9))).unwrap();
    let all = fig.trace("All 3").unwrap();
    assert_eq!(all.x, vec![d(2022, 1, 2)]);
    assert!(approx(all.y[0], 0.0));
}

#[tokio::test]
async fn base_date_in_range_is_unchanged_by_snapping() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 10)).await.unwrap();
    let fig = data.tvl_price_chart(d(2022, 1, 2)).unwrap();
    assert_eq!(fig.trace("TVL").unwrap().x, vec![d(2022, 1, 2), d(2022, 1, 3)]);
}

#[tokio::test]
async fn every_chart_row_within_range_starts_at_zero() {
    let dash = dashboard(MockMetrics::new());
    let data = dash.load_data(d(2022, 1, 4)).await.unwrap();

    for base in data.tvl_prices.dates().to_vec() {
        let fig = data.tvl_price_chart(base).unwrap();
        for trace in &fig.traces {
            assert_eq!(trace.x[0], base);
            assert!(approx(trace.y[0], 0.0), "{} at {base}", trace.name);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Integration: failures
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn tvl_outage_fails_the_whole_load() {
    let mut metrics = MockMetrics::new();
    metrics.tvl_down = true;
    let err = dashboard(metrics).load_data(d(2022, 1, 4)).await.unwrap_err();
    match err {
        CoreError::DataUnavailable { source_name, reason } => {
            assert_eq!(source_name, "historical TVL");
            assert!(reason.contains("HTTP 503"));
        }
        other => panic!("Expected DataUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn unlisted_stablecoin_fails_the_whole_load() {
    let mut metrics = MockMetrics::new();
    metrics.listings.retain(|l| l.name != "Binance USD");
    let err = dashboard(metrics).load_data(d(2022, 1, 4)).await.unwrap_err();
    assert!(matches!(err, CoreError::DataUnavailable { .. }));
    assert!(err.to_string().contains("Binance USD"));
}

#[tokio::test]
async fn empty_stablecoin_history_fails_the_whole_load() {
    let mut metrics = MockMetrics::new();
    metrics.mcaps.remove("2");
    let err = dashboard(metrics).load_data(d(2022, 1, 4)).await.unwrap_err();
    assert!(matches!(err, CoreError::DataUnavailable { .. }));
}

#[test]
fn dashboard_reports_provider_names() {
    let dash = dashboard(MockMetrics::new());
    assert_eq!(dash.provider_names(), vec!["MockMetrics", "MockPrices"]);
    assert_eq!(dash.settings().default_base_date, d(2022, 1, 1));
}
