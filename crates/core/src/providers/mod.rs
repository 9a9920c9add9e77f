pub mod registry;
pub mod traits;

// API provider implementations
pub mod defillama;
pub mod yahoo_finance;
