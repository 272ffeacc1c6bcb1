//! Prompt builders for the analysis and ranking stages
//!
//! Each stage sends a system+user pair. The builders are plain functions
//! so tests can assert on the exact text without touching a provider.

use crate::report::TickerReport;
use verdict_market::NewsItem;

/// System prompt for the sentiment stage
pub fn sentiment_system(symbol: &str) -> String {
    format!(
        "You are a sentiment analysis assistant. Analyze the sentiment of the given news \
         articles for {symbol} and provide a summary of the overall sentiment and any notable \
         changes over time. Be measured and discerning. You are a skeptical investor."
    )
}

/// User prompt for the sentiment stage
///
/// `news_section` may be empty; the call still proceeds with no articles.
pub fn sentiment_user(symbol: &str, news_section: &str) -> String {
    format!(
        "News articles for {symbol}:\n{news_section}\n\n----\n\nProvide a summary of the \
         overall sentiment and any notable changes over time."
    )
}

/// Build the news section of the sentiment prompt from articles and
/// their extracted body text
pub fn format_news_section(articles: &[(NewsItem, String)]) -> String {
    let mut section = String::new();
    for (item, text) in articles {
        section.push_str(&format!(
            "\n\n---\n\nDate: {}\nTitle: {}\nText: {}",
            item.published_date(),
            item.title,
            text
        ));
    }
    section
}

/// System prompt for the industry stage
pub fn industry_system(industry: &str, sector: &str) -> String {
    format!(
        "You are an industry analysis assistant. Provide an analysis of the {industry} industry \
         and {sector} sector, including trends, growth prospects, regulatory changes, and \
         competitive landscape. Be measured and discerning. Truly think about the positives and \
         negatives of the stock. Be sure of your analysis. You are a skeptical investor."
    )
}

/// User prompt for the industry stage
pub fn industry_user(industry: &str, sector: &str) -> String {
    format!("Provide an analysis of the {industry} industry and {sector} sector.")
}

/// System prompt for the final recommendation stage
pub fn final_system(symbol: &str) -> String {
    format!(
        "You are a financial analyst providing a final investment recommendation for {symbol} \
         based on the given data and analyses. Be measured and discerning. Truly think about the \
         positives and negatives of the stock. Be sure of your analysis. You are a skeptical \
         investor."
    )
}

/// User prompt for the final recommendation stage
pub fn final_user(
    symbol: &str,
    sentiment_analysis: &str,
    analyst_ratings: &str,
    industry_analysis: &str,
) -> String {
    format!(
        "Ticker: {symbol}\n\nSentiment Analysis:\n{sentiment_analysis}\n\nLatest Analyst \
         Ratings:\n{analyst_ratings}\n\nIndustry Analysis:\n{industry_analysis}\n\nBased on the \
         provided data and analyses, please provide a comprehensive investment analysis and \
         recommendation for {symbol}. Consider the company's financial strength, growth \
         prospects, competitive position, and potential risks. Provide a clear and concise \
         recommendation on whether to buy, hold, or sell the stock, along with supporting \
         rationale."
    )
}

/// System prompt for the ranking stage
pub fn ranking_system(industry: &str) -> String {
    format!(
        "You are a financial analyst providing a ranking of companies in the {industry} industry \
         based on their investment potential. Be discerning and sharp. Truly think about whether \
         a stock is valuable or not. You are a skeptical investor."
    )
}

/// User prompt for the ranking stage, listing every surviving ticker's
/// final analysis and current price
pub fn ranking_user(industry: &str, reports: &[TickerReport]) -> String {
    let analysis_text = reports
        .iter()
        .map(|r| {
            format!(
                "Ticker: {}\nCurrent Price: {}\nAnalysis:\n{}",
                r.symbol,
                r.price,
                r.final_analysis.as_deref().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Industry: {industry}\n\nCompany Analyses:\n{analysis_text}\n\nBased on the provided \
         analyses, please rank the companies from most attractive to least attractive for \
         investment. Provide a brief rationale for your ranking. In each rationale, include the \
         current price (if available) and a price target."
    )
}
