//! Per-ticker report and batch outcome types

use serde::{Deserialize, Serialize};
use verdict_market::{NewsItem, Quote};

/// Everything collected and produced for one ticker
///
/// Created once per ticker at pipeline start; the analysis fields are
/// populated progressively by the stages. `final_analysis` is only
/// meaningful once sentiment and industry analyses are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerReport {
    /// Ticker symbol
    pub symbol: String,
    /// Historical price series
    pub history: Vec<Quote>,
    /// Balance sheet, provider-shaped text
    pub balance_sheet: String,
    /// Income statements, provider-shaped text
    pub financials: String,
    /// Recent news items
    pub news: Vec<NewsItem>,
    /// Latest analyst rating summary
    pub analyst_ratings: String,
    /// Current price
    pub price: f64,
    /// Industry classification from the provider
    pub industry: Option<String>,
    /// Sector classification from the provider
    pub sector: Option<String>,

    /// Sentiment stage output
    pub sentiment_analysis: Option<String>,
    /// Industry stage output
    pub industry_analysis: Option<String>,
    /// Final recommendation stage output
    pub final_analysis: Option<String>,
}

impl TickerReport {
    /// Create an empty report for a symbol
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            history: Vec::new(),
            balance_sheet: String::new(),
            financials: String::new(),
            news: Vec::new(),
            analyst_ratings: String::new(),
            price: 0.0,
            industry: None,
            sector: None,
            sentiment_analysis: None,
            industry_analysis: None,
            final_analysis: None,
        }
    }
}

/// A ticker that failed somewhere in the pipeline, with the reason
///
/// Failed tickers are reported alongside the ranking instead of being
/// silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerFailure {
    pub symbol: String,
    pub reason: String,
}

/// Final output of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerdict {
    /// Tickers that made it through all three stages
    pub reports: Vec<TickerReport>,
    /// Tickers dropped along the way, with reasons
    pub failures: Vec<TickerFailure>,
    /// Free-text ranking from the model
    pub ranking: String,
}

impl BatchVerdict {
    /// Render the user-visible output: the ranking text plus an explicit
    /// note for every skipped ticker.
    pub fn render(&self) -> String {
        let mut out = self.ranking.clone();

        if !self.failures.is_empty() {
            out.push_str("\n\n--- Skipped tickers ---\n");
            for failure in &self.failures {
                out.push_str(&format!("{}: {}\n", failure.symbol, failure.reason));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_empty() {
        let report = TickerReport::new("MSFT");
        assert_eq!(report.symbol, "MSFT");
        assert!(report.news.is_empty());
        assert!(report.sentiment_analysis.is_none());
        assert!(report.final_analysis.is_none());
    }

    #[test]
    fn test_render_without_failures() {
        let verdict = BatchVerdict {
            reports: vec![],
            failures: vec![],
            ranking: "1. MSFT".to_string(),
        };
        assert_eq!(verdict.render(), "1. MSFT");
    }

    #[test]
    fn test_render_lists_skipped_tickers() {
        let verdict = BatchVerdict {
            reports: vec![],
            failures: vec![TickerFailure {
                symbol: "BAD".to_string(),
                reason: "no price data".to_string(),
            }],
            ranking: "1. MSFT".to_string(),
        };
        let rendered = verdict.render();
        assert!(rendered.contains("Skipped tickers"));
        assert!(rendered.contains("BAD: no price data"));
    }
}
