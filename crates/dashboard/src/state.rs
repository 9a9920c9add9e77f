use std::sync::Arc;

use defi_dashboard_core::Dashboard;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// Holds the provider clients only. Market data is never
/// stored here: each page render fetches its own.
pub struct AppState {
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Arc<Self> {
        Arc::new(Self { dashboard })
    }
}
