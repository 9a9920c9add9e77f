use super::defillama::DefiLlamaProvider;
use super::traits::{DefiMetricsProvider, MarketPriceProvider};
use super::yahoo_finance::YahooFinanceProvider;
use crate::errors::CoreError;
use crate::models::settings::Settings;

/// The two external data sources the dashboard reads from.
///
/// Services only see the traits, so tests can register mocks in place of
/// the network-backed defaults.
pub struct ProviderRegistry {
    metrics: Box<dyn DefiMetricsProvider>,
    prices: Box<dyn MarketPriceProvider>,
}

impl ProviderRegistry {
    /// Create a registry from explicit providers.
    pub fn new(
        metrics: Box<dyn DefiMetricsProvider>,
        prices: Box<dyn MarketPriceProvider>,
    ) -> Self {
        Self { metrics, prices }
    }

    /// DefiLlama for protocol metrics, Yahoo Finance for prices.
    pub fn new_with_defaults(settings: &Settings) -> Result<Self, CoreError> {
        let metrics = DefiLlamaProvider::new(settings);
        let prices = YahooFinanceProvider::new()?;
        Ok(Self::new(Box::new(metrics), Box::new(prices)))
    }

    pub fn metrics(&self) -> &dyn DefiMetricsProvider {
        self.metrics.as_ref()
    }

    pub fn prices(&self) -> &dyn MarketPriceProvider {
        self.prices.as_ref()
    }

    /// Provider names, for logs and the page footer.
    pub fn provider_names(&self) -> Vec<String> {
        vec![self.metrics.name().to_string(), self.prices.name().to_string()]
    }
}
