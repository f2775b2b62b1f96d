use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough aligned observations: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Benchmark returns have zero variance; beta and R-squared are undefined")]
    DegenerateRegression,

    #[error("Annualized volatility of {0} is zero; Sharpe ratio is undefined")]
    ZeroVolatility(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}
