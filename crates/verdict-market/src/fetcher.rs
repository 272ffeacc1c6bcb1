//! One-pass market data fetch for a ticker

use crate::error::Result;
use crate::fundamentals::QuoteSummaryClient;
use crate::types::{CompanyProfile, StockData};
use crate::yahoo::YahooFinanceClient;
use tracing::info;

/// Facade over the Yahoo clients, fetching everything the analysis
/// pipeline needs about one ticker.
pub struct MarketDataFetcher {
    yahoo: YahooFinanceClient,
    summary: QuoteSummaryClient,
}

impl MarketDataFetcher {
    /// Create a new fetcher
    pub fn new() -> Result<Self> {
        Ok(Self {
            yahoo: YahooFinanceClient::new(),
            summary: QuoteSummaryClient::new()?,
        })
    }

    /// Fetch price history, balance sheet, financials, and news for a
    /// ticker with the given lookback window in years.
    ///
    /// Any provider error propagates to the caller.
    pub async fn fetch_stock_data(
        &self,
        symbol: &str,
        years: u32,
        news_limit: usize,
    ) -> Result<StockData> {
        info!(symbol, years, "fetching market data");

        let history = self.yahoo.price_history(symbol, years).await?;
        let balance_sheet = self.summary.balance_sheet(symbol).await?;
        let financials = self.summary.income_statement(symbol).await?;
        let news = self.yahoo.news(symbol, news_limit).await?;

        Ok(StockData {
            history,
            balance_sheet,
            financials,
            news,
        })
    }

    /// Latest closing price
    pub async fn current_price(&self, symbol: &str) -> Result<f64> {
        self.yahoo.current_price(symbol).await
    }

    /// Latest analyst recommendation summary (sentinel when none exist)
    pub async fn analyst_ratings(&self, symbol: &str) -> Result<String> {
        self.summary.analyst_ratings(symbol).await
    }

    /// Industry and sector classification
    pub async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        self.summary.company_profile(symbol).await
    }
}
