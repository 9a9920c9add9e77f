use thiserror::Error;

/// Unified error type for the entire defi-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// All variants are fatal to the current page render: there are no
/// retries and no partial charts.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data fetching ───────────────────────────────────────────────
    #[error("Data unavailable from {source_name}: {reason}")]
    DataUnavailable {
        source_name: String,
        reason: String,
    },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Table shaping ───────────────────────────────────────────────
    #[error("Alignment failed: {0}")]
    Alignment(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    // ── User input ──────────────────────────────────────────────────
    #[error("Invalid date selection: {date} is outside [{min}, {max}]")]
    InvalidDateSelection {
        date: String,
        min: String,
        max: String,
    },
}

impl CoreError {
    /// Wrap any provider-side failure as "data unavailable" for `source_name`.
    pub fn unavailable(source_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CoreError::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; keep the path, drop the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
