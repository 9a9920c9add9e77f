use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use defi_dashboard_core::errors::CoreError;

use crate::page;

/// Failure to render the dashboard. Always fatal to the request: the user
/// sees an error page, never a partial chart.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::DataUnavailable { .. })
            | Self::Core(CoreError::Api { .. })
            | Self::Core(CoreError::Network(_)) => StatusCode::BAD_GATEWAY,
            Self::Core(CoreError::InvalidDateSelection { .. }) => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(%status, error = %self, "dashboard render failed");
        (status, Html(page::render_error(status, &self.to_string()))).into_response()
    }
}
