//! Shared market data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock quote data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// A news item attached to a ticker
///
/// Immutable, sourced from the market data provider's news search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article URL
    pub link: String,
    /// Headline
    pub title: String,
    /// Publisher name
    pub publisher: String,
    /// Publish time (UNIX timestamp, seconds)
    pub published: i64,
}

impl NewsItem {
    /// Publish date formatted as YYYY-MM-DD
    pub fn published_date(&self) -> String {
        DateTime::from_timestamp(self.published, 0)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Sector/industry classification for a company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub industry: Option<String>,
    pub sector: Option<String>,
}

/// Everything the analysis pipeline needs about one ticker, fetched in
/// one pass from the provider.
#[derive(Debug, Clone)]
pub struct StockData {
    /// Historical price series for the lookback window
    pub history: Vec<Quote>,
    /// Most recent balance sheet statements, provider-shaped
    pub balance_sheet: String,
    /// Most recent income statements, provider-shaped
    pub financials: String,
    /// Recent news for the ticker
    pub news: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_date_format() {
        let item = NewsItem {
            link: "https://example.com/a".to_string(),
            title: "Quarterly results".to_string(),
            publisher: "Example Wire".to_string(),
            published: 1_700_000_000,
        };
        assert_eq!(item.published_date(), "2023-11-14");
    }
}
