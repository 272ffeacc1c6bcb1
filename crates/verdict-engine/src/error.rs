//! Error types for the analysis pipeline

use thiserror::Error;

/// Errors produced by the analysis pipeline and ranking stage
#[derive(Debug, Error)]
pub enum EngineError {
    /// LLM call failed
    #[error("LLM error: {0}")]
    Llm(#[from] verdict_llm::LlmError),

    /// Market data fetch failed
    #[error("Market data error: {0}")]
    Market(#[from] verdict_market::MarketError),

    /// A stage ran before the stages it depends on
    #[error("{stage} analysis for {symbol} requires earlier stages to have run")]
    MissingStage { symbol: String, stage: String },

    /// Model returned a completion with no usable text
    #[error("Model returned no text content")]
    EmptyResponse,

    /// No tickers survived collection, nothing to rank
    #[error("No tickers to analyze")]
    EmptyBatch,

    /// Structured ticker suggestion did not match the expected schema
    #[error("Malformed ticker suggestion: {0}")]
    MalformedSuggestion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::MissingStage {
            symbol: "MSFT".to_string(),
            stage: "final".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "final analysis for MSFT requires earlier stages to have run"
        );
    }
}
