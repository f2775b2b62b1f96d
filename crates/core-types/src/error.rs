use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid date range: from_date {from_date} must be before to_date {to_date}")]
    InvalidRange {
        from_date: NaiveDate,
        to_date: NaiveDate,
    },

    #[error("Date range {from_date}..{to_date} exceeds the maximum span of {max_years} years")]
    RangeTooLong {
        from_date: NaiveDate,
        to_date: NaiveDate,
        max_years: u32,
    },
}
