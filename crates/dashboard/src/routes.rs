use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use defi_dashboard_core::models::picker::DatePicker;

use crate::error::WebError;
use crate::page::{self, Panel};
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

/// Base dates selected on the page, as `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    tvl_start: Option<String>,
    #[serde(default)]
    stable_start: Option<String>,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "providers": state.dashboard.provider_names(),
    }))
}

/// Fetch everything, compute both change series, render the page.
async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let today = chrono::Utc::now().date_naive();
    let data = state.dashboard.load_data(today).await?;

    let tvl_base = resolve_base_date(query.tvl_start.as_deref(), &data.tvl_picker);
    let stable_base = resolve_base_date(query.stable_start.as_deref(), &data.stablecoin_picker);
    tracing::debug!(%tvl_base, %stable_base, "rendering dashboard");

    let tvl_chart = data.tvl_price_chart(tvl_base)?;
    let stable_chart = data.stablecoin_chart(stable_base)?;

    Ok(Html(page::render_dashboard(
        &Panel {
            param: "tvl_start",
            picker: &data.tvl_picker,
            base_date: tvl_base,
            figure: &tvl_chart,
        },
        &Panel {
            param: "stable_start",
            picker: &data.stablecoin_picker,
            base_date: stable_base,
            figure: &stable_chart,
        },
    )))
}

/// Picker default when absent or unparsable; otherwise clamped into range.
fn resolve_base_date(raw: Option<&str>, picker: &DatePicker) -> NaiveDate {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(|date| picker.clamp(date))
        .unwrap_or(picker.default)
}
