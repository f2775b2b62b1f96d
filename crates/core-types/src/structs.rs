use crate::error::CoreError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single daily closing-price observation for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// An annualized risk-free rate observation, aligned by date to a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFreePoint {
    pub date: NaiveDate,
    pub rate_annualized: f64,
}

/// The longest date span a single request may cover.
pub const MAX_RANGE_YEARS: u32 = 10;

/// A validated analysis window, inclusive on both ends.
///
/// Construction is the single gate for range validity: the caller either gets
/// a well-formed range or a `CoreError`, never a silently clamped one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    from_date: NaiveDate,
    to_date: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting empty/inverted spans and spans longer than
    /// ten calendar years. A span of exactly ten years is accepted.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, CoreError> {
        if to_date <= from_date {
            return Err(CoreError::InvalidRange {
                from_date,
                to_date,
            });
        }

        let limit = from_date
            .checked_add_months(Months::new(MAX_RANGE_YEARS * 12))
            .ok_or(CoreError::InvalidRange { from_date, to_date })?;

        if to_date > limit {
            return Err(CoreError::RangeTooLong {
                from_date,
                to_date,
                max_years: MAX_RANGE_YEARS,
            });
        }

        Ok(Self { from_date, to_date })
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    /// True when `date` falls inside the range (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }
}
