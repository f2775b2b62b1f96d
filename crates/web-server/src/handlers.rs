use crate::{AppState, error::AppError};
use analytics::AlphaBetaReport;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use core_types::{DateRange, PricePoint};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl RangeQuery {
    fn validate(&self) -> Result<DateRange, AppError> {
        Ok(DateRange::new(self.from_date, self.to_date)?)
    }
}

/// # GET /get-return/{ticker}?from_date=..&to_date=..
/// The raw daily price series for one symbol over the requested window.
pub async fn get_returns(
    Path(ticker): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PricePoint>>, AppError> {
    if !state.settings.universe.allows_ticker(&ticker) {
        return Err(AppError::SymbolNotAllowed(ticker));
    }
    let range = query.validate()?;

    let prices = state.price_source.fetch_prices(&ticker, &range).await?;
    Ok(Json(prices))
}

/// # GET /get-alpha/{ticker}/{benchmark}?from_date=..&to_date=..
/// The full alpha/beta performance decomposition of `ticker` against
/// `benchmark` over the requested window.
pub async fn get_alpha(
    Path((ticker, benchmark)): Path<(String, String)>,
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AlphaBetaReport>, AppError> {
    if !state.settings.universe.allows_ticker(&ticker) {
        return Err(AppError::SymbolNotAllowed(ticker));
    }
    if !state.settings.universe.allows_benchmark(&benchmark) {
        return Err(AppError::SymbolNotAllowed(benchmark));
    }
    let range = query.validate()?;

    let (ticker_prices, benchmark_prices) = tokio::join!(
        state.price_source.fetch_prices(&ticker, &range),
        state.price_source.fetch_prices(&benchmark, &range),
    );
    let ticker_prices = ticker_prices?;
    let benchmark_prices = benchmark_prices?;

    // The risk-free leg only needs to cover dates the ticker trades on; the
    // engine's inner join drops everything else anyway.
    let dates: Vec<NaiveDate> = ticker_prices.iter().map(|p| p.date).collect();
    let risk_free = state.risk_free.series_for(&dates);

    let report = state
        .engine
        .alpha_report(&ticker_prices, &benchmark_prices, &risk_free)?;

    tracing::info!(%ticker, %benchmark, rows = report.data.len(), "served alpha report");
    Ok(Json(report))
}
