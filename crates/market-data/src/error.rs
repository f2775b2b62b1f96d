use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("No price data for {symbol} between {from_date} and {to_date}")]
    NoData {
        symbol: String,
        from_date: chrono::NaiveDate,
        to_date: chrono::NaiveDate,
    },

    #[error("Market-data provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Failed to deserialize provider response: {0}")]
    Deserialization(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}
