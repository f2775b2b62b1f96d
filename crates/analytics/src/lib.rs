//! # Alphastat Analytics Engine
//!
//! This crate computes the risk-adjusted performance decomposition of a
//! security against a benchmark: daily and annualized returns, indexed price
//! paths, CAPM alpha/beta with significance tests, and Sharpe ratios.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AlphaEngine` is a stateless calculator.
//!   It takes date-ordered price and risk-free series as input and produces an
//!   `AlphaBetaReport` as output, atomically: any undefined arithmetic case is
//!   a named error, never a NaN smuggled into the report.
//!
//! ## Public API
//!
//! - `AlphaEngine`: the main struct that contains the calculation logic.
//! - `AlphaBetaReport` / `ReportRow`: the standardized output bundle.
//! - `AnalyticsError`: the specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod regression;
pub mod report;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AlphaEngine;
pub use error::AnalyticsError;
pub use regression::OlsFit;
pub use report::{AlphaBetaReport, ReportRow};
pub use returns::TRADING_DAYS_PER_YEAR;
