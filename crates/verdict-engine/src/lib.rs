//! Per-ticker analysis pipeline and ranking for stock-verdict
//!
//! For each ticker the pipeline collects market data and news, then runs
//! three LLM stages (sentiment, industry, final recommendation), and
//! finally asks the model once more to rank the batch by investment
//! attractiveness.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use verdict_engine::{AnalysisPipeline, EngineConfig, ExecutionMode};
//! use verdict_llm::providers::OpenAIProvider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(OpenAIProvider::from_env()?);
//!     let pipeline = AnalysisPipeline::new(provider, EngineConfig::default())?;
//!
//!     let verdict = pipeline
//!         .run("Software", &["MSFT".to_string()], ExecutionMode::Concurrent)
//!         .await?;
//!     println!("{}", verdict.render());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod suggest;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use pipeline::{AnalysisPipeline, ExecutionMode};
pub use report::{BatchVerdict, TickerFailure, TickerReport};
pub use suggest::suggest_tickers;
