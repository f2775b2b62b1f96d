use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A comprehensive, standardized report of a security's performance against
/// its benchmark.
///
/// This struct is the final output of the `AlphaEngine` and is serialized
/// verbatim by the HTTP layer; field names are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaBetaReport {
    // I. Alpha estimators. Both conventions are reported: the geometric
    // decomposition against the benchmark, and the OLS intercept.
    pub alpha_geom_annualized: f64,
    pub alpha_geom_daily: f64,
    pub alpha_regression_annualized: f64,
    pub alpha_regression_daily: f64,

    // II. Regression diagnostics.
    pub beta: f64,
    pub r_squared: f64,
    pub alpha_pvalue: f64,
    pub beta_pvalue: f64,

    // III. Per-instrument annualized figures over the aligned window.
    pub ticker_annualized_return: f64,
    pub benchmark_annualized_return: f64,
    pub ticker_annualized_volatility: f64,
    pub benchmark_annualized_volatility: f64,
    pub ticker_sharpe_ratio: f64,
    pub benchmark_sharpe_ratio: f64,

    // IV. The row-aligned time series table, one row per date common to
    // ticker, benchmark, and risk-free series.
    pub data: Vec<ReportRow>,
}

/// One aligned date in the report table.
///
/// The first row of a report has no prior trading day, so its four return
/// fields are `None` (serialized as explicit nulls, never zero-filled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    /// Price rebased so the first aligned observation is 100.
    pub ticker_indexed_price: f64,
    pub benchmark_indexed_price: f64,
    pub ticker_return_daily: Option<f64>,
    pub benchmark_return_daily: Option<f64>,
    pub ticker_return_excess_daily: Option<f64>,
    pub benchmark_return_excess_daily: Option<f64>,
    pub risk_free_rate_annualized: f64,
}
