//! Return, volatility, and Sharpe arithmetic over daily price series.
//!
//! Everything here operates on the aligned window the engine hands it; the
//! annualization constant is the conventional 252 trading days per year.

use crate::error::AnalyticsError;

/// Trading days per calendar year used for all annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple daily returns between consecutive observations:
/// `r_t = p_t / p_{t-1} - 1`. The result is one element shorter than the
/// input. Fewer than two prices cannot produce a return.
pub fn daily_returns(prices: &[f64]) -> Result<Vec<f64>, AnalyticsError> {
    if prices.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            needed: 2,
            got: prices.len(),
        });
    }

    Ok(prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Annualized return from compounded daily returns:
/// `(prod(1 + r_t))^(252/n) - 1`.
pub fn annualized_return(daily: &[f64]) -> Result<f64, AnalyticsError> {
    if daily.is_empty() {
        return Err(AnalyticsError::InsufficientData { needed: 1, got: 0 });
    }

    let compounded: f64 = daily.iter().map(|r| 1.0 + r).product();
    if compounded <= 0.0 {
        // A -100% (or worse) daily move; the geometric mean is undefined.
        return Err(AnalyticsError::Calculation(
            "compounded growth factor is non-positive".to_string(),
        ));
    }

    Ok(compounded.powf(TRADING_DAYS_PER_YEAR / daily.len() as f64) - 1.0)
}

/// Annualized volatility: sample standard deviation of the daily returns
/// scaled by sqrt(252).
pub fn annualized_volatility(daily: &[f64]) -> Result<f64, AnalyticsError> {
    if daily.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            needed: 2,
            got: daily.len(),
        });
    }

    let mean = daily.iter().sum::<f64>() / daily.len() as f64;
    let variance = daily.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (daily.len() - 1) as f64;

    Ok(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Sharpe ratio over annualized figures. An exactly-zero volatility is
/// surfaced as a named error instead of dividing through.
pub fn sharpe_ratio(
    annualized_return: f64,
    annualized_risk_free: f64,
    annualized_volatility: f64,
    instrument: &str,
) -> Result<f64, AnalyticsError> {
    if annualized_volatility == 0.0 {
        return Err(AnalyticsError::ZeroVolatility(instrument.to_string()));
    }

    Ok((annualized_return - annualized_risk_free) / annualized_volatility)
}

/// Converts an annualized rate to its daily equivalent multiplicatively:
/// `(1 + annual)^(1/252) - 1`.
pub fn annual_to_daily(rate: f64) -> f64 {
    (1.0 + rate).powf(1.0 / TRADING_DAYS_PER_YEAR) - 1.0
}

/// Converts a daily rate to its annualized equivalent multiplicatively:
/// `(1 + daily)^252 - 1`. Inverse of [`annual_to_daily`].
pub fn daily_to_annual(rate: f64) -> f64 {
    (1.0 + rate).powf(TRADING_DAYS_PER_YEAR) - 1.0
}
