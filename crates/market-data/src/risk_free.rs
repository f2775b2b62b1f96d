use chrono::NaiveDate;
use core_types::RiskFreePoint;

/// Capability interface for the risk-free leg of the excess-return series.
///
/// The engine needs an annualized rate per aligned date; where that rate
/// comes from (a flat configured value, a treasury-yield feed, a cache) is
/// this trait's business.
pub trait RiskFreeSource: Send + Sync {
    /// Produces one rate observation per requested date.
    fn series_for(&self, dates: &[NaiveDate]) -> Vec<RiskFreePoint>;
}

/// The shipped provider: a single configured annualized rate expanded over
/// whatever dates the caller asks for.
#[derive(Debug, Clone, Copy)]
pub struct ConstantRiskFree {
    rate_annualized: f64,
}

impl ConstantRiskFree {
    pub fn new(rate_annualized: f64) -> Self {
        Self { rate_annualized }
    }
}

impl RiskFreeSource for ConstantRiskFree {
    fn series_for(&self, dates: &[NaiveDate]) -> Vec<RiskFreePoint> {
        dates
            .iter()
            .map(|date| RiskFreePoint {
                date: *date,
                rate_annualized: self.rate_annualized,
            })
            .collect()
    }
}
