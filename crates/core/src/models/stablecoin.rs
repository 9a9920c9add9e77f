use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::column::Stablecoin;
use crate::errors::CoreError;

/// A stablecoin listed by the metrics provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablecoinListing {
    /// Provider-specific identifier (DefiLlama uses numeric strings, e.g. "1")
    pub id: String,
    /// Display name, e.g. "Tether"
    pub name: String,
    pub symbol: String,
}

/// Display name → provider identifier, for every known stablecoin.
///
/// Used once per render to resolve the three tracked coins, then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StablecoinIdentifierTable {
    ids: HashMap<String, String>,
}

impl StablecoinIdentifierTable {
    /// Build from provider listings. If a name is listed twice the first
    /// listing wins, matching a positional lookup over the provider's order.
    pub fn from_listings(listings: impl IntoIterator<Item = StablecoinListing>) -> Self {
        let mut ids = HashMap::new();
        for listing in listings {
            ids.entry(listing.name).or_insert(listing.id);
        }
        Self { ids }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    /// Identifier of one of the tracked stablecoins.
    pub fn resolve(&self, coin: Stablecoin) -> Result<&str, CoreError> {
        self.get(coin.display_name()).ok_or_else(|| {
            CoreError::unavailable(
                "stablecoin listing",
                format!("no identifier for {}", coin.display_name()),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
