use crate::error::MarketDataError;
use async_trait::async_trait;
use chrono::Days;
use configuration::MarketDataConfig;
use core_types::{DateRange, PricePoint};
use std::time::Duration;

pub mod error;
pub mod responses;
pub mod risk_free;

// --- Public API ---
pub use responses::ChartResponse;
pub use risk_free::{ConstantRiskFree, RiskFreeSource};

/// The generic, abstract interface for a daily-price history provider.
/// This trait is the contract the serving layer uses, allowing the
/// underlying implementation (live or mock) to be swapped out.
///
/// A fixed (symbol, range) pair must be an idempotent read: repeated calls
/// against unchanged upstream data return identical series.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the ordered daily price series for `symbol` over `range`,
    /// one point per trading day the provider has, no duplicates, gaps left
    /// as gaps.
    async fn fetch_prices(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Vec<PricePoint>, MarketDataError>;
}

/// A concrete `PriceSource` backed by the Yahoo-style chart endpoint.
#[derive(Clone)]
pub struct YahooChartSource {
    client: reqwest::Client,
    base_url: String,
}

impl YahooChartSource {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, range: &DateRange) -> String {
        // period2 is exclusive upstream, so push it one day past to_date to
        // keep the range boundary inclusive.
        let period1 = range
            .from_date()
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        let period2 = range
            .to_date()
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();

        format!(
            "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}",
            self.base_url, symbol, period1, period2
        )
    }
}

#[async_trait]
impl PriceSource for YahooChartSource {
    async fn fetch_prices(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let url = self.chart_url(symbol, range);
        tracing::debug!(%symbol, %url, "fetching daily prices");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // The provider reports symbol-level failures inside the JSON body,
        // with a non-success status. Inspect the body before the status so an
        // unknown symbol is not misreported as an outage.
        if let Ok(parsed) = serde_json::from_str::<ChartResponse>(&text) {
            if let Some(err) = parsed.chart.error {
                return if err.code.eq_ignore_ascii_case("not found") {
                    Err(MarketDataError::UnknownSymbol(symbol.to_string()))
                } else {
                    Err(MarketDataError::ProviderUnavailable(format!(
                        "{}: {}",
                        err.code, err.description
                    )))
                };
            }

            if !status.is_success() {
                return Err(MarketDataError::ProviderUnavailable(format!(
                    "provider returned status {status}"
                )));
            }

            let result = parsed
                .chart
                .result
                .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
                .ok_or(MarketDataError::NoData {
                    symbol: symbol.to_string(),
                    from_date: range.from_date(),
                    to_date: range.to_date(),
                })?;

            return responses::price_points(&result, symbol, range);
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderUnavailable(format!(
                "provider returned status {status}"
            )));
        }

        Err(MarketDataError::Deserialization(format!(
            "unexpected chart payload for {symbol}"
        )))
    }
}
