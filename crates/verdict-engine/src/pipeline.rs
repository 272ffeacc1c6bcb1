//! The per-ticker analysis pipeline
//!
//! Each ticker flows through three LLM stages: sentiment, industry, and
//! final recommendation. The batch runs either one ticker start-to-finish
//! at a time, or stage-wise concurrently across all tickers (every
//! ticker's sentiment call issued together and awaited together before
//! any industry call goes out). Concurrency is only across tickers within
//! one stage, never across stages.
//!
//! A ticker that fails is converted to a [`TickerFailure`] carrying the
//! reason; it is skipped by later stages and reported alongside the
//! ranking instead of being dropped silently.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::prompts;
use crate::report::{BatchVerdict, TickerFailure, TickerReport};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};
use verdict_llm::{CompletionRequest, LlmProvider, Message};
use verdict_market::{ArticleExtractor, MarketDataFetcher};

/// How the batch is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One ticker start-to-finish at a time
    Sequential,
    /// All tickers per stage, stages in order
    Concurrent,
}

/// The three analysis stages, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sentiment,
    Industry,
    Final,
}

impl Stage {
    const ALL: [Stage; 3] = [Stage::Sentiment, Stage::Industry, Stage::Final];

    fn name(self) -> &'static str {
        match self {
            Stage::Sentiment => "sentiment",
            Stage::Industry => "industry",
            Stage::Final => "final",
        }
    }
}

/// One ticker's slot in a running batch
struct Slot {
    report: TickerReport,
    error: Option<String>,
}

/// The analysis pipeline
///
/// The LLM provider is an injected dependency so tests can substitute a
/// stub implementation.
pub struct AnalysisPipeline {
    provider: Arc<dyn LlmProvider>,
    fetcher: MarketDataFetcher,
    articles: ArticleExtractor,
    config: EngineConfig,
}

impl AnalysisPipeline {
    /// Create a new pipeline with the given provider and configuration
    pub fn new(provider: Arc<dyn LlmProvider>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            fetcher: MarketDataFetcher::new()?,
            articles: ArticleExtractor::new(),
            config,
        })
    }

    /// Access the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Send one system+user pair and return the completion text
    async fn complete(&self, system: String, user: String) -> Result<String> {
        let request = CompletionRequest::builder(&self.config.model)
            .system(system)
            .add_message(Message::user(user))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self.provider.complete(request).await?;
        response
            .message
            .text()
            .map(str::to_string)
            .ok_or(EngineError::EmptyResponse)
    }

    /// Fetch all market data for one ticker
    ///
    /// Any provider error propagates to the caller.
    pub async fn collect(&self, symbol: &str) -> Result<TickerReport> {
        let data = self
            .fetcher
            .fetch_stock_data(symbol, self.config.lookback_years, self.config.news_limit)
            .await?;
        let analyst_ratings = self.fetcher.analyst_ratings(symbol).await?;
        let price = self.fetcher.current_price(symbol).await?;
        let profile = self.fetcher.company_profile(symbol).await?;

        let mut report = TickerReport::new(symbol);
        report.history = data.history;
        report.balance_sheet = data.balance_sheet;
        report.financials = data.financials;
        report.news = data.news;
        report.analyst_ratings = analyst_ratings;
        report.price = price;
        report.industry = profile.industry;
        report.sector = profile.sector;
        Ok(report)
    }

    /// Fetch market data for every symbol, converting per-ticker fetch
    /// errors into failures
    pub async fn collect_batch(
        &self,
        symbols: &[String],
    ) -> (Vec<TickerReport>, Vec<TickerFailure>) {
        let mut reports = Vec::new();
        let mut failures = Vec::new();

        for symbol in symbols {
            match self.collect(symbol).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(symbol, error = %e, "market data fetch failed");
                    failures.push(TickerFailure {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (reports, failures)
    }

    /// Run one stage for one ticker
    async fn fill_stage(&self, stage: Stage, report: &mut TickerReport) -> Result<()> {
        match stage {
            Stage::Sentiment => self.fill_sentiment(report).await,
            Stage::Industry => self.fill_industry(report).await,
            Stage::Final => self.fill_final(report).await,
        }
    }

    /// Sentiment stage: fetch each article's text and summarize the news
    /// tone. An empty news list still produces a call with an empty news
    /// section.
    pub async fn fill_sentiment(&self, report: &mut TickerReport) -> Result<()> {
        info!(symbol = %report.symbol, "analyzing sentiment");

        let mut articles = Vec::with_capacity(report.news.len());
        for item in &report.news {
            let text = self.articles.article_text(&item.link).await;
            articles.push((item.clone(), text));
        }
        let news_section = prompts::format_news_section(&articles);

        let text = self
            .complete(
                prompts::sentiment_system(&report.symbol),
                prompts::sentiment_user(&report.symbol, &news_section),
            )
            .await?;
        report.sentiment_analysis = Some(text);
        Ok(())
    }

    /// Industry stage: analyze the ticker's industry and sector
    pub async fn fill_industry(&self, report: &mut TickerReport) -> Result<()> {
        info!(symbol = %report.symbol, "industry analysis");

        let industry = report.industry.as_deref().unwrap_or("unknown");
        let sector = report.sector.as_deref().unwrap_or("unknown");

        let text = self
            .complete(
                prompts::industry_system(industry, sector),
                prompts::industry_user(industry, sector),
            )
            .await?;
        report.industry_analysis = Some(text);
        Ok(())
    }

    /// Final stage: buy/hold/sell recommendation from the earlier stages
    ///
    /// Requires sentiment and industry analyses to be populated.
    pub async fn fill_final(&self, report: &mut TickerReport) -> Result<()> {
        info!(symbol = %report.symbol, "final analysis");

        let sentiment = report
            .sentiment_analysis
            .as_deref()
            .ok_or_else(|| EngineError::MissingStage {
                symbol: report.symbol.clone(),
                stage: "final".to_string(),
            })?;
        let industry = report
            .industry_analysis
            .as_deref()
            .ok_or_else(|| EngineError::MissingStage {
                symbol: report.symbol.clone(),
                stage: "final".to_string(),
            })?;

        let text = self
            .complete(
                prompts::final_system(&report.symbol),
                prompts::final_user(&report.symbol, sentiment, &report.analyst_ratings, industry),
            )
            .await?;
        report.final_analysis = Some(text);
        Ok(())
    }

    /// Run all three stages for each ticker, one ticker start-to-finish
    /// at a time
    pub async fn analyze_sequential(
        &self,
        reports: Vec<TickerReport>,
    ) -> (Vec<TickerReport>, Vec<TickerFailure>) {
        let mut slots: Vec<Slot> = reports
            .into_iter()
            .map(|report| Slot {
                report,
                error: None,
            })
            .collect();

        for slot in &mut slots {
            for stage in Stage::ALL {
                if let Err(e) = self.fill_stage(stage, &mut slot.report).await {
                    warn!(
                        symbol = %slot.report.symbol,
                        stage = stage.name(),
                        error = %e,
                        "stage failed"
                    );
                    slot.error = Some(format!("{} stage: {e}", stage.name()));
                    break;
                }
            }
        }

        partition(slots)
    }

    /// Run each stage concurrently across all tickers
    ///
    /// Every surviving ticker's call for a stage is issued together and
    /// the stage waits for all of them before the next stage starts. A
    /// failing ticker is skipped by later stages; the rest of the batch
    /// continues.
    pub async fn analyze_concurrent(
        &self,
        reports: Vec<TickerReport>,
    ) -> (Vec<TickerReport>, Vec<TickerFailure>) {
        let mut slots: Vec<Slot> = reports
            .into_iter()
            .map(|report| Slot {
                report,
                error: None,
            })
            .collect();

        for stage in Stage::ALL {
            let futures: Vec<_> = slots
                .iter_mut()
                .filter(|slot| slot.error.is_none())
                .map(|slot| async move {
                    if let Err(e) = self.fill_stage(stage, &mut slot.report).await {
                        warn!(
                            symbol = %slot.report.symbol,
                            stage = stage.name(),
                            error = %e,
                            "stage failed"
                        );
                        slot.error = Some(format!("{} stage: {e}", stage.name()));
                    }
                })
                .collect();

            join_all(futures).await;
        }

        partition(slots)
    }

    /// Ranking stage: one prompt listing every surviving ticker's final
    /// analysis and current price; returns the raw model text
    pub async fn rank(&self, industry: &str, reports: &[TickerReport]) -> Result<String> {
        if reports.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        info!(count = reports.len(), "ranking companies");

        self.complete(
            prompts::ranking_system(industry),
            prompts::ranking_user(industry, reports),
        )
        .await
    }

    /// Full run: collect market data, analyze every ticker, rank the batch
    pub async fn run(
        &self,
        industry: &str,
        symbols: &[String],
        mode: ExecutionMode,
    ) -> Result<BatchVerdict> {
        let (reports, mut failures) = self.collect_batch(symbols).await;

        let (reports, stage_failures) = match mode {
            ExecutionMode::Sequential => self.analyze_sequential(reports).await,
            ExecutionMode::Concurrent => self.analyze_concurrent(reports).await,
        };
        failures.extend(stage_failures);

        let ranking = self.rank(industry, &reports).await?;

        Ok(BatchVerdict {
            reports,
            failures,
            ranking,
        })
    }
}

/// Split finished slots into surviving reports and failures
fn partition(slots: Vec<Slot>) -> (Vec<TickerReport>, Vec<TickerFailure>) {
    let mut reports = Vec::new();
    let mut failures = Vec::new();

    for slot in slots {
        match slot.error {
            None => reports.push(slot.report),
            Some(reason) => failures.push(TickerFailure {
                symbol: slot.report.symbol,
                reason,
            }),
        }
    }

    (reports, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use verdict_llm::{CompletionResponse, LlmError, StopReason, TokenUsage};

    /// Stub provider that tags each call by stage (derived from the
    /// system prompt) and can fail calls mentioning a given symbol.
    struct StubProvider {
        calls: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(symbol: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: Some(symbol.to_string()),
            }
        }

        fn stages(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn stage_of(system: &str) -> &'static str {
        if system.contains("sentiment analysis assistant") {
            "sentiment"
        } else if system.contains("industry analysis assistant") {
            "industry"
        } else if system.contains("final investment recommendation") {
            "final"
        } else {
            "ranking"
        }
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> verdict_llm::Result<CompletionResponse> {
            let system = request.system.unwrap_or_default();
            let stage = stage_of(&system);

            if let Some(symbol) = &self.fail_for {
                if system.contains(symbol.as_str()) {
                    return Err(LlmError::RequestFailed(format!(
                        "stub failure for {symbol}"
                    )));
                }
            }

            self.calls.lock().unwrap().push(stage.to_string());

            Ok(CompletionResponse {
                message: Message::assistant(format!("{stage} text")),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 0,
                    output_tokens: 0,
                },
            })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn pipeline_with(provider: StubProvider) -> (AnalysisPipeline, Arc<StubProvider>) {
        let provider = Arc::new(provider);
        let pipeline =
            AnalysisPipeline::new(provider.clone(), EngineConfig::default()).unwrap();
        (pipeline, provider)
    }

    fn reports(symbols: &[&str]) -> Vec<TickerReport> {
        symbols
            .iter()
            .map(|s| {
                let mut r = TickerReport::new(*s);
                r.analyst_ratings = "No analyst ratings available.".to_string();
                r.price = 100.0;
                r
            })
            .collect()
    }

    #[tokio::test]
    async fn test_concurrent_stage_barrier() {
        // All K sentiment calls must complete before any industry call
        let (pipeline, provider) = pipeline_with(StubProvider::new());
        let batch = reports(&["AAA", "BBB", "CCC"]);

        let (done, failures) = pipeline.analyze_concurrent(batch).await;
        assert_eq!(done.len(), 3);
        assert!(failures.is_empty());

        let stages = provider.stages();
        assert_eq!(stages.len(), 9);
        assert!(stages[..3].iter().all(|s| s == "sentiment"));
        assert!(stages[3..6].iter().all(|s| s == "industry"));
        assert!(stages[6..].iter().all(|s| s == "final"));
    }

    #[tokio::test]
    async fn test_concurrent_failure_skips_later_stages() {
        let (pipeline, provider) = pipeline_with(StubProvider::failing_for("BAD"));
        let batch = reports(&["GOOD", "BAD"]);

        let (done, failures) = pipeline.analyze_concurrent(batch).await;
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].symbol, "GOOD");
        assert!(done[0].final_analysis.is_some());

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].symbol, "BAD");
        assert!(failures[0].reason.contains("sentiment stage"));

        // BAD never reaches industry or final
        let stages = provider.stages();
        assert_eq!(stages.iter().filter(|s| *s == "industry").count(), 1);
        assert_eq!(stages.iter().filter(|s| *s == "final").count(), 1);
    }

    #[tokio::test]
    async fn test_sequential_reports_failure_with_reason() {
        let (pipeline, _provider) = pipeline_with(StubProvider::failing_for("BAD"));
        let batch = reports(&["BAD", "GOOD"]);

        let (done, failures) = pipeline.analyze_sequential(batch).await;
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].symbol, "GOOD");
        assert_eq!(failures.len(), 1);
        assert!(failures[0].reason.contains("stub failure for BAD"));
    }

    #[tokio::test]
    async fn test_sentiment_proceeds_with_no_news() {
        let (pipeline, _provider) = pipeline_with(StubProvider::new());
        let mut report = TickerReport::new("MSFT");
        assert!(report.news.is_empty());

        pipeline.fill_sentiment(&mut report).await.unwrap();
        assert_eq!(report.sentiment_analysis.as_deref(), Some("sentiment text"));
    }

    #[tokio::test]
    async fn test_final_requires_earlier_stages() {
        let (pipeline, _provider) = pipeline_with(StubProvider::new());
        let mut report = TickerReport::new("MSFT");

        let result = pipeline.fill_final(&mut report).await;
        assert!(matches!(result, Err(EngineError::MissingStage { .. })));
    }

    #[tokio::test]
    async fn test_rank_empty_batch_is_error() {
        let (pipeline, _provider) = pipeline_with(StubProvider::new());
        let result = pipeline.rank("Software", &[]).await;
        assert!(matches!(result, Err(EngineError::EmptyBatch)));
    }

    #[tokio::test]
    async fn test_rank_returns_model_text() {
        let (pipeline, _provider) = pipeline_with(StubProvider::new());
        let mut batch = reports(&["MSFT"]);
        batch[0].sentiment_analysis = Some("s".to_string());
        batch[0].industry_analysis = Some("i".to_string());
        batch[0].final_analysis = Some("f".to_string());

        let ranking = pipeline.rank("Software", &batch).await.unwrap();
        assert_eq!(ranking, "ranking text");
    }

    #[tokio::test]
    #[ignore] // Requires network access and an OpenAI API key
    async fn test_end_to_end_single_ticker() {
        use verdict_llm::providers::OpenAIProvider;

        let provider = Arc::new(OpenAIProvider::from_env().unwrap());
        let pipeline = AnalysisPipeline::new(provider, EngineConfig::default()).unwrap();

        let verdict = pipeline
            .run(
                "Software",
                &["MSFT".to_string()],
                ExecutionMode::Concurrent,
            )
            .await
            .unwrap();

        assert_eq!(verdict.reports.len(), 1);
        assert!(verdict.reports[0].final_analysis.is_some());
        assert!(!verdict.ranking.is_empty());
    }
}
