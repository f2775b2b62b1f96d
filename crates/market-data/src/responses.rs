//! Wire schema of the provider's chart endpoint and its conversion into the
//! core `PricePoint` series.

use chrono::DateTime;
use core_types::{DateRange, PricePoint};
use serde::Deserialize;

use crate::error::MarketDataError;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteBlock>,
    /// Split/dividend-adjusted closes; preferred over raw closes when present.
    pub adjclose: Option<Vec<AdjCloseBlock>>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjCloseBlock {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Converts one chart result into an ordered, de-duplicated price series
/// restricted to the requested range.
///
/// The provider pads non-trading days with null closes; those slots are
/// skipped, never interpolated.
pub fn price_points(
    result: &ChartResult,
    symbol: &str,
    range: &DateRange,
) -> Result<Vec<PricePoint>, MarketDataError> {
    let closes: &[Option<f64>] = match result.indicators.adjclose.as_ref().and_then(|a| a.first())
    {
        Some(adj) if adj.adjclose.len() == result.timestamp.len() => &adj.adjclose,
        _ => result
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .ok_or_else(|| {
                MarketDataError::Deserialization(format!(
                    "chart result for {symbol} carries no close series"
                ))
            })?,
    };

    let mut points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes.iter())
        .filter_map(|(ts, close)| {
            let price = (*close)?;
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            range.contains(date).then_some(PricePoint { date, price })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    // The provider occasionally repeats the current trading day; keep the
    // first observation per date.
    points.dedup_by_key(|p| p.date);

    if points.is_empty() {
        return Err(MarketDataError::NoData {
            symbol: symbol.to_string(),
            from_date: range.from_date(),
            to_date: range.to_date(),
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(from, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(to, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    const FIXTURE: &str = r#"
    {
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL" },
                "timestamp": [1577955600, 1578042000, 1578301200, 1578387600],
                "indicators": {
                    "quote": [{ "close": [74.3, 73.8, null, 74.9] }],
                    "adjclose": [{ "adjclose": [72.7, 72.2, null, 73.3] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_and_skips_null_closes() {
        let response: ChartResponse = serde_json::from_str(FIXTURE).unwrap();
        let result = &response.chart.result.unwrap()[0];
        let points = price_points(result, "AAPL", &range("2020-01-01", "2020-02-01")).unwrap();

        // Four timestamps, one null close.
        assert_eq!(points.len(), 3);
        // Adjusted closes are preferred over raw closes.
        assert_eq!(points[0].price, 72.7);
        // Strictly increasing dates, no duplicates.
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn restricts_to_requested_range() {
        let response: ChartResponse = serde_json::from_str(FIXTURE).unwrap();
        let result = &response.chart.result.unwrap()[0];
        // Only the first two timestamps (Jan 2-3) fall in range.
        let points = price_points(result, "AAPL", &range("2020-01-01", "2020-01-04")).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn empty_window_is_no_data() {
        let response: ChartResponse = serde_json::from_str(FIXTURE).unwrap();
        let result = &response.chart.result.unwrap()[0];
        let outcome = price_points(result, "AAPL", &range("2021-01-01", "2021-02-01"));
        assert!(matches!(outcome, Err(MarketDataError::NoData { .. })));
    }

    #[test]
    fn error_payload_deserializes() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.chart.error.unwrap().code, "Not Found");
    }
}
