//! Market data retrieval for stock-verdict
//!
//! This crate wraps the external data sources the analysis pipeline
//! depends on:
//!
//! - Yahoo Finance quotes, price history, and ticker news (via
//!   `yahoo_finance_api`)
//! - Balance sheets, income statements, company profiles, and analyst
//!   recommendations (via the Yahoo quoteSummary endpoint)
//! - Article page fetching and paragraph text extraction

pub mod article;
pub mod error;
pub mod fetcher;
pub mod fundamentals;
pub mod types;
pub mod yahoo;

pub use article::{ARTICLE_ERROR, ArticleExtractor, extract_paragraph_text};
pub use error::{MarketError, Result};
pub use fetcher::MarketDataFetcher;
pub use fundamentals::{NO_RATINGS, QuoteSummaryClient, format_ratings};
pub use types::{CompanyProfile, NewsItem, Quote, StockData};
pub use yahoo::YahooFinanceClient;
