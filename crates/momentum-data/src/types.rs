//! Data types for provider API responses.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily bar from the FMP `historical-price-eod/full` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Adjusted close.
    #[serde(rename = "adjClose", default)]
    pub adj_close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Price used for return computation: adjusted close when the provider
    /// supplies one, otherwise the raw close.
    #[must_use]
    pub fn return_price(&self) -> f64 {
        if self.adj_close > 0.0 {
            self.adj_close
        } else {
            self.close
        }
    }
}

/// Top-level Yahoo Finance chart response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// Chart payload.
    pub chart: Chart,
}

/// Yahoo chart payload. `result` is null for unknown tickers.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    /// Results, one per requested symbol.
    pub result: Option<Vec<ChartResult>>,
    /// Error object when the request failed.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Yahoo chart error object.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    /// Error code, e.g. "Not Found".
    pub code: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
}

/// One symbol's chart data.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    /// Exchange metadata.
    #[serde(default)]
    pub meta: ChartMeta,
    /// Bar timestamps in seconds since the epoch.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Price series.
    pub indicators: Indicators,
}

/// Exchange metadata attached to a chart result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Symbol as reported by Yahoo.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

/// Price indicator blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    /// OHLCV quotes.
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
    /// Split and dividend adjusted closes.
    #[serde(default)]
    pub adjclose: Vec<ChartAdjClose>,
}

/// Raw OHLCV block. Yahoo emits `null` for missing bars.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuote {
    /// Close prices.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Adjusted close block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartAdjClose {
    /// Adjusted close prices.
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResult {
    /// Flattens the result into `(date, price)` observations.
    ///
    /// Adjusted closes are preferred; bars whose price is null fall back to
    /// the raw close and are skipped when both are missing. Timestamps are
    /// shifted to the exchange's local date.
    #[must_use]
    pub fn observations(&self) -> (Vec<NaiveDate>, Vec<f64>) {
        let adjusted = self.indicators.adjclose.first().map(|a| &a.adjclose);
        let close = self.indicators.quote.first().map(|q| &q.close);

        let mut dates = Vec::with_capacity(self.timestamp.len());
        let mut prices = Vec::with_capacity(self.timestamp.len());

        for (idx, ts) in self.timestamp.iter().enumerate() {
            let price = adjusted
                .and_then(|a| a.get(idx).copied().flatten())
                .or_else(|| close.and_then(|c| c.get(idx).copied().flatten()));
            let Some(price) = price else { continue };
            let Some(time) = DateTime::from_timestamp(ts + self.meta.gmtoffset, 0) else {
                continue;
            };
            dates.push(time.date_naive());
            prices.push(price);
        }

        (dates, prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historical_price_prefers_adjusted() {
        let json = r#"{"date":"2024-01-02","open":1.0,"high":2.0,"low":0.5,"close":1.5,"adjClose":1.4,"volume":10}"#;
        let bar: HistoricalPrice = serde_json::from_str(json).unwrap();
        assert_eq!(bar.parsed_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(bar.return_price(), 1.4);

        let json = r#"{"date":"2024-01-02","close":1.5}"#;
        let bar: HistoricalPrice = serde_json::from_str(json).unwrap();
        assert_eq!(bar.return_price(), 1.5);
    }

    #[test]
    fn test_chart_observations() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "MSFT", "gmtoffset": -18000},
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {
                        "quote": [{"close": [100.0, null, 102.0]}],
                        "adjclose": [{"adjclose": [99.0, null, null]}]
                    }
                }],
                "error": null
            }
        }"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        let result = &response.chart.result.unwrap()[0];
        let (dates, prices) = result.observations();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            ]
        );
        assert_eq!(prices, vec![99.0, 102.0]);
    }

    #[test]
    fn test_chart_unknown_symbol() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(response.chart.result.is_none());
        assert_eq!(response.chart.error.unwrap().code, "Not Found");
    }
}
