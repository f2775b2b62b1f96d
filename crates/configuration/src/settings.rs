use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub market_data: MarketDataConfig,
    pub universe: UniverseConfig,
    pub analytics: AnalyticsConfig,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Settings for the upstream market-data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    /// Base URL of the chart endpoint. Overridable so tests can point the
    /// client at a local mock server.
    pub base_url: String,
    /// Per-request timeout for provider calls.
    pub timeout_secs: u64,
}

/// The allow-list of symbols the service will answer for.
///
/// An empty list means "no restriction". This replaces a hard-coded ticker
/// menu in the serving layer with configuration-supplied state.
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseConfig {
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub benchmarks: Vec<String>,
}

impl UniverseConfig {
    /// True when `symbol` may be used as a ticker.
    pub fn allows_ticker(&self, symbol: &str) -> bool {
        self.tickers.is_empty() || self.tickers.iter().any(|t| t == symbol)
    }

    /// True when `symbol` may be used as a benchmark.
    pub fn allows_benchmark(&self, symbol: &str) -> bool {
        self.benchmarks.is_empty() || self.benchmarks.iter().any(|b| b == symbol)
    }
}

/// Parameters of the analytics engine that are policy, not code.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Flat annualized risk-free rate used to build the excess-return series,
    /// e.g. 0.04 for 4%.
    pub risk_free_rate_annualized: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_universe_allows_everything() {
        let universe = UniverseConfig {
            tickers: vec![],
            benchmarks: vec![],
        };
        assert!(universe.allows_ticker("AAPL"));
        assert!(universe.allows_benchmark("SPY"));
    }

    #[test]
    fn populated_universe_is_an_allow_list() {
        let universe = UniverseConfig {
            tickers: vec!["AAPL".into(), "MSFT".into()],
            benchmarks: vec!["SPY".into()],
        };
        assert!(universe.allows_ticker("MSFT"));
        assert!(!universe.allows_ticker("TSLA"));
        assert!(universe.allows_benchmark("SPY"));
        assert!(!universe.allows_benchmark("QQQ"));
    }
}
