use analytics::AnalyticsError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use market_data::error::MarketDataError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Range(#[from] core_types::CoreError),
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Symbol {0} is not in the configured universe")]
    SymbolNotAllowed(String),
}

impl AppError {
    /// The HTTP status each failure maps to. Range problems are the caller's
    /// fault (400), unknown symbols are 404, undefined statistics are 422,
    /// and upstream outages are 502.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Range(_) => StatusCode::BAD_REQUEST,
            AppError::MarketData(MarketDataError::UnknownSymbol(_)) => StatusCode::NOT_FOUND,
            AppError::MarketData(MarketDataError::NoData { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::MarketData(_) => StatusCode::BAD_GATEWAY,
            AppError::Analytics(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SymbolNotAllowed(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
