use crate::error::AnalyticsError;
use crate::regression;
use crate::report::{AlphaBetaReport, ReportRow};
use crate::returns;
use chrono::NaiveDate;
use core_types::{PricePoint, RiskFreePoint};
use std::collections::BTreeMap;

/// The fewest aligned dates a report can be built from: four dates give three
/// return observations, the minimum for a t-test with positive degrees of
/// freedom.
const MIN_ALIGNED_DATES: usize = 4;

/// A stateless calculator for the alpha/beta performance decomposition.
///
/// Every statistic is computed over the date-aligned window only (inner join
/// of ticker, benchmark, and risk-free series), never over the raw
/// per-instrument series. The report is produced atomically or not at all.
#[derive(Debug, Default)]
pub struct AlphaEngine {}

impl AlphaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: decomposes the ticker's performance against the
    /// benchmark over the window where all three input series overlap.
    pub fn alpha_report(
        &self,
        ticker_prices: &[PricePoint],
        benchmark_prices: &[PricePoint],
        risk_free: &[RiskFreePoint],
    ) -> Result<AlphaBetaReport, AnalyticsError> {
        let aligned = align(ticker_prices, benchmark_prices, risk_free);
        if aligned.len() < MIN_ALIGNED_DATES {
            return Err(AnalyticsError::InsufficientData {
                needed: MIN_ALIGNED_DATES,
                got: aligned.len(),
            });
        }

        let dates: Vec<NaiveDate> = aligned.iter().map(|row| row.date).collect();
        let ticker: Vec<f64> = aligned.iter().map(|row| row.ticker_price).collect();
        let benchmark: Vec<f64> = aligned.iter().map(|row| row.benchmark_price).collect();
        let rf_annual: Vec<f64> = aligned.iter().map(|row| row.rf_annualized).collect();

        let ticker_daily = returns::daily_returns(&ticker)?;
        let benchmark_daily = returns::daily_returns(&benchmark)?;

        // The risk-free rate for the return earned into date t is the rate
        // quoted on date t, converted to its daily equivalent.
        let rf_daily: Vec<f64> = rf_annual[1..]
            .iter()
            .map(|rate| returns::annual_to_daily(*rate))
            .collect();

        let ticker_excess: Vec<f64> = ticker_daily
            .iter()
            .zip(rf_daily.iter())
            .map(|(r, rf)| r - rf)
            .collect();
        let benchmark_excess: Vec<f64> = benchmark_daily
            .iter()
            .zip(rf_daily.iter())
            .map(|(r, rf)| r - rf)
            .collect();

        let fit = regression::fit(&ticker_excess, &benchmark_excess)?;

        let ticker_annualized_return = returns::annualized_return(&ticker_daily)?;
        let benchmark_annualized_return = returns::annualized_return(&benchmark_daily)?;
        let ticker_annualized_volatility = returns::annualized_volatility(&ticker_daily)?;
        let benchmark_annualized_volatility = returns::annualized_volatility(&benchmark_daily)?;

        let mean_rf_annualized = rf_annual.iter().sum::<f64>() / rf_annual.len() as f64;
        let ticker_sharpe_ratio = returns::sharpe_ratio(
            ticker_annualized_return,
            mean_rf_annualized,
            ticker_annualized_volatility,
            "ticker",
        )?;
        let benchmark_sharpe_ratio = returns::sharpe_ratio(
            benchmark_annualized_return,
            mean_rf_annualized,
            benchmark_annualized_volatility,
            "benchmark",
        )?;

        // Geometric decomposition: the return left over after the benchmark
        // exposure implied by beta is taken out.
        let alpha_geom_annualized =
            ticker_annualized_return - fit.beta * benchmark_annualized_return;
        if alpha_geom_annualized <= -1.0 {
            return Err(AnalyticsError::Calculation(
                "geometric alpha is -100% or worse; no daily equivalent exists".to_string(),
            ));
        }
        let alpha_geom_daily = returns::annual_to_daily(alpha_geom_annualized);

        // The regression intercept is a daily figure; annualize it with the
        // same multiplicative convention used everywhere else.
        let alpha_regression_daily = fit.alpha;
        let alpha_regression_annualized = returns::daily_to_annual(fit.alpha);

        let data = assemble_rows(
            &dates,
            &ticker,
            &benchmark,
            &rf_annual,
            &ticker_daily,
            &benchmark_daily,
            &ticker_excess,
            &benchmark_excess,
        );

        tracing::debug!(
            rows = data.len(),
            observations = fit.observations,
            beta = fit.beta,
            r_squared = fit.r_squared,
            "assembled alpha report"
        );

        Ok(AlphaBetaReport {
            alpha_geom_annualized,
            alpha_geom_daily,
            alpha_regression_annualized,
            alpha_regression_daily,
            beta: fit.beta,
            r_squared: fit.r_squared,
            alpha_pvalue: fit.alpha_pvalue,
            beta_pvalue: fit.beta_pvalue,
            ticker_annualized_return,
            benchmark_annualized_return,
            ticker_annualized_volatility,
            benchmark_annualized_volatility,
            ticker_sharpe_ratio,
            benchmark_sharpe_ratio,
            data,
        })
    }
}

/// One date where all three input series have an observation.
struct AlignedRow {
    date: NaiveDate,
    ticker_price: f64,
    benchmark_price: f64,
    rf_annualized: f64,
}

/// Inner join of the three series on date. A date missing from any one series
/// is dropped from all of them; nothing is forward-filled.
fn align(
    ticker: &[PricePoint],
    benchmark: &[PricePoint],
    risk_free: &[RiskFreePoint],
) -> Vec<AlignedRow> {
    let benchmark_by_date: BTreeMap<NaiveDate, f64> =
        benchmark.iter().map(|p| (p.date, p.price)).collect();
    let rf_by_date: BTreeMap<NaiveDate, f64> = risk_free
        .iter()
        .map(|p| (p.date, p.rate_annualized))
        .collect();

    ticker
        .iter()
        .filter_map(|point| {
            let benchmark_price = *benchmark_by_date.get(&point.date)?;
            let rf_annualized = *rf_by_date.get(&point.date)?;
            Some(AlignedRow {
                date: point.date,
                ticker_price: point.price,
                benchmark_price,
                rf_annualized,
            })
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn assemble_rows(
    dates: &[NaiveDate],
    ticker: &[f64],
    benchmark: &[f64],
    rf_annual: &[f64],
    ticker_daily: &[f64],
    benchmark_daily: &[f64],
    ticker_excess: &[f64],
    benchmark_excess: &[f64],
) -> Vec<ReportRow> {
    let ticker_base = ticker[0];
    let benchmark_base = benchmark[0];

    dates
        .iter()
        .enumerate()
        .map(|(i, date)| ReportRow {
            date: *date,
            ticker_indexed_price: ticker[i] / ticker_base * 100.0,
            benchmark_indexed_price: benchmark[i] / benchmark_base * 100.0,
            // Row 0 has no prior trading day; its returns are explicit nulls.
            ticker_return_daily: i.checked_sub(1).map(|j| ticker_daily[j]),
            benchmark_return_daily: i.checked_sub(1).map(|j| benchmark_daily[j]),
            ticker_return_excess_daily: i.checked_sub(1).map(|j| ticker_excess[j]),
            benchmark_return_excess_daily: i.checked_sub(1).map(|j| benchmark_excess[j]),
            risk_free_rate_annualized: rf_annual[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    const TOL: f64 = 1e-6;

    fn dates_from(start: &str, count: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        (0..count)
            .map(|i| start.checked_add_days(Days::new(i as u64)).unwrap())
            .collect()
    }

    fn price_series(dates: &[NaiveDate], prices: impl Fn(usize) -> f64) -> Vec<PricePoint> {
        dates
            .iter()
            .enumerate()
            .map(|(i, date)| PricePoint {
                date: *date,
                price: prices(i),
            })
            .collect()
    }

    fn flat_risk_free(dates: &[NaiveDate], rate: f64) -> Vec<RiskFreePoint> {
        dates
            .iter()
            .map(|date| RiskFreePoint {
                date: *date,
                rate_annualized: rate,
            })
            .collect()
    }

    /// A deterministic wavy price path with nonzero variance.
    fn wavy(base: f64, i: usize) -> f64 {
        base * (1.0 + 0.002 * i as f64 + 0.01 * ((i as f64) * 0.7).sin())
    }

    #[test]
    fn full_year_report_is_populated_and_finite() {
        let dates = dates_from("2020-01-01", 253);
        let ticker = price_series(&dates, |i| wavy(120.0, i));
        let benchmark = price_series(&dates, |i| wavy(300.0, i) + 0.5 * (i as f64 % 3.0));
        let rf = flat_risk_free(&dates, 0.02);

        let report = AlphaEngine::new()
            .alpha_report(&ticker, &benchmark, &rf)
            .unwrap();

        assert_eq!(report.data.len(), 253);
        assert!(report.beta.is_finite());
        assert!(report.r_squared.is_finite());
        assert!(report.alpha_pvalue.is_finite());
        assert!(report.beta_pvalue.is_finite());
        assert!(report.ticker_sharpe_ratio.is_finite());
        assert!(report.benchmark_sharpe_ratio.is_finite());
        assert!(report.ticker_annualized_volatility > 0.0);

        // The geometric alpha must decompose exactly.
        let expected =
            report.ticker_annualized_return - report.beta * report.benchmark_annualized_return;
        assert!((report.alpha_geom_annualized - expected).abs() < TOL);
    }

    #[test]
    fn indexed_series_start_at_one_hundred() {
        let dates = dates_from("2021-06-01", 30);
        let ticker = price_series(&dates, |i| wavy(55.0, i));
        let benchmark = price_series(&dates, |i| wavy(410.0, i));
        let rf = flat_risk_free(&dates, 0.04);

        let report = AlphaEngine::new()
            .alpha_report(&ticker, &benchmark, &rf)
            .unwrap();

        let first = &report.data[0];
        assert!((first.ticker_indexed_price - 100.0).abs() < TOL);
        assert!((first.benchmark_indexed_price - 100.0).abs() < TOL);
        assert_eq!(first.ticker_return_daily, None);
        assert_eq!(first.benchmark_return_excess_daily, None);
        assert!(report.data[1].ticker_return_daily.is_some());
    }

    #[test]
    fn self_benchmark_yields_unit_beta_and_zero_alpha() {
        let dates = dates_from("2022-01-01", 60);
        let ticker = price_series(&dates, |i| wavy(80.0, i));
        let rf = flat_risk_free(&dates, 0.03);

        let report = AlphaEngine::new()
            .alpha_report(&ticker, &ticker, &rf)
            .unwrap();

        assert!((report.beta - 1.0).abs() < TOL);
        assert!(report.alpha_regression_daily.abs() < TOL);
        assert!((report.r_squared - 1.0).abs() < TOL);
    }

    #[test]
    fn reports_are_idempotent() {
        let dates = dates_from("2020-03-01", 40);
        let ticker = price_series(&dates, |i| wavy(200.0, i));
        let benchmark = price_series(&dates, |i| wavy(95.0, i) - 0.2 * (i as f64 % 2.0));
        let rf = flat_risk_free(&dates, 0.01);

        let engine = AlphaEngine::new();
        let first = engine.alpha_report(&ticker, &benchmark, &rf).unwrap();
        let second = engine.alpha_report(&ticker, &benchmark, &rf).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn alignment_is_an_inner_join() {
        let dates = dates_from("2020-01-01", 10);
        let ticker = price_series(&dates, |i| wavy(100.0, i));
        // Drop one mid-window date from the benchmark only.
        let missing = dates[4];
        let benchmark: Vec<PricePoint> = price_series(&dates, |i| wavy(50.0, i))
            .into_iter()
            .filter(|p| p.date != missing)
            .collect();
        let rf = flat_risk_free(&dates, 0.02);

        let report = AlphaEngine::new()
            .alpha_report(&ticker, &benchmark, &rf)
            .unwrap();

        assert_eq!(report.data.len(), 9);
        assert!(report.data.iter().all(|row| row.date != missing));
    }

    #[test]
    fn constant_benchmark_is_degenerate() {
        let dates = dates_from("2020-01-01", 50);
        let ticker = price_series(&dates, |i| wavy(100.0, i));
        let benchmark = price_series(&dates, |_| 400.0);
        // A zero risk-free rate keeps the benchmark's excess returns exactly
        // constant, which is the degenerate case.
        let rf = flat_risk_free(&dates, 0.0);

        let result = AlphaEngine::new().alpha_report(&ticker, &benchmark, &rf);
        assert!(matches!(result, Err(AnalyticsError::DegenerateRegression)));
    }

    #[test]
    fn constant_ticker_fails_on_zero_volatility() {
        let dates = dates_from("2020-01-01", 50);
        let ticker = price_series(&dates, |_| 42.0);
        let benchmark = price_series(&dates, |i| wavy(400.0, i));
        let rf = flat_risk_free(&dates, 0.0);

        let result = AlphaEngine::new().alpha_report(&ticker, &benchmark, &rf);
        assert!(matches!(result, Err(AnalyticsError::ZeroVolatility(_))));
    }

    #[test]
    fn single_observation_is_insufficient() {
        let dates = dates_from("2020-01-01", 1);
        let ticker = price_series(&dates, |_| 100.0);
        let benchmark = price_series(&dates, |_| 400.0);
        let rf = flat_risk_free(&dates, 0.02);

        let result = AlphaEngine::new().alpha_report(&ticker, &benchmark, &rf);
        assert!(matches!(
            result,
            Err(AnalyticsError::InsufficientData { got: 1, .. })
        ));
    }

    #[test]
    fn disjoint_series_are_insufficient() {
        let ticker_dates = dates_from("2020-01-01", 20);
        let benchmark_dates = dates_from("2021-01-01", 20);
        let ticker = price_series(&ticker_dates, |i| wavy(100.0, i));
        let benchmark = price_series(&benchmark_dates, |i| wavy(400.0, i));
        let rf = flat_risk_free(&ticker_dates, 0.02);

        let result = AlphaEngine::new().alpha_report(&ticker, &benchmark, &rf);
        assert!(matches!(
            result,
            Err(AnalyticsError::InsufficientData { got: 0, .. })
        ));
    }
}
