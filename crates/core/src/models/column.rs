use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Every column the dashboard knows how to chart.
///
/// Tables are keyed by this enum rather than by free-form labels, so a
/// misspelled column is caught when a table is built, not when a chart
/// reaches for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnId {
    /// Total value locked across all chains
    Tvl,
    Btc,
    Eth,
    Usdt,
    Usdc,
    Busd,
    /// Sum of USDT + USDC + BUSD market caps
    AllThree,
}

impl ColumnId {
    pub const ALL: [ColumnId; 7] = [
        ColumnId::Tvl,
        ColumnId::Btc,
        ColumnId::Eth,
        ColumnId::Usdt,
        ColumnId::Usdc,
        ColumnId::Busd,
        ColumnId::AllThree,
    ];

    /// Short label used in legends and tables.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnId::Tvl => "TVL",
            ColumnId::Btc => "BTC",
            ColumnId::Eth => "ETH",
            ColumnId::Usdt => "USDT",
            ColumnId::Usdc => "USDC",
            ColumnId::Busd => "BUSD",
            ColumnId::AllThree => "All 3",
        }
    }

    /// Parse a column label. Accepts the short labels and the stablecoin
    /// display names reported by the metrics provider.
    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        let trimmed = label.trim();
        if let Some(id) = ColumnId::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
        {
            return Ok(*id);
        }
        Stablecoin::ALL
            .iter()
            .find(|s| s.display_name() == trimmed)
            .map(|s| s.column())
            .ok_or_else(|| CoreError::UnknownColumn(label.to_string()))
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Assets whose daily spot price is charted against TVL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetTicker {
    Btc,
    Eth,
}

impl AssetTicker {
    pub const ALL: [AssetTicker; 2] = [AssetTicker::Btc, AssetTicker::Eth];

    /// Ticker as understood by the market price provider.
    pub fn ticker(&self) -> &'static str {
        match self {
            AssetTicker::Btc => "BTC-USD",
            AssetTicker::Eth => "ETH-USD",
        }
    }

    pub fn column(&self) -> ColumnId {
        match self {
            AssetTicker::Btc => ColumnId::Btc,
            AssetTicker::Eth => ColumnId::Eth,
        }
    }
}

impl std::fmt::Display for AssetTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

/// The three fiat-backed stablecoins tracked by the market-cap chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stablecoin {
    Tether,
    UsdCoin,
    BinanceUsd,
}

impl Stablecoin {
    /// Fixed order used for concatenation and legends.
    pub const ALL: [Stablecoin; 3] = [
        Stablecoin::Tether,
        Stablecoin::UsdCoin,
        Stablecoin::BinanceUsd,
    ];

    /// Name as listed by the metrics provider; used to look up its identifier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stablecoin::Tether => "Tether",
            Stablecoin::UsdCoin => "USD Coin",
            Stablecoin::BinanceUsd => "Binance USD",
        }
    }

    pub fn column(&self) -> ColumnId {
        match self {
            Stablecoin::Tether => ColumnId::Usdt,
            Stablecoin::UsdCoin => ColumnId::Usdc,
            Stablecoin::BinanceUsd => ColumnId::Busd,
        }
    }
}

impl std::fmt::Display for Stablecoin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
