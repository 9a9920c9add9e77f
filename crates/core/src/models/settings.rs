use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provider endpoints, request timeout, and base-date picker constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// DefiLlama TVL API root (historical chain TVL)
    pub defillama_api_url: String,

    /// DefiLlama stablecoins API root
    pub defillama_stablecoins_url: String,

    /// Per-request timeout for provider HTTP calls
    pub request_timeout_secs: u64,

    /// Earliest date of the all-chain TVL history; lower bound of the TVL picker.
    pub tvl_history_start: NaiveDate,

    /// Earliest selectable date of the stablecoin picker.
    pub stablecoin_history_start: NaiveDate,

    /// Initial base date of both pickers.
    pub default_base_date: NaiveDate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            defillama_api_url: "https://api.llama.fi".to_string(),
            defillama_stablecoins_url: "https://stablecoins.llama.fi".to_string(),
            request_timeout_secs: 30,
            tvl_history_start: NaiveDate::from_ymd_opt(2018, 8, 16).unwrap_or_default(),
            stablecoin_history_start: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap_or_default(),
            default_base_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
        }
    }
}
