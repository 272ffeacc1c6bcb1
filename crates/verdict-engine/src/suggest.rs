//! Structured ticker suggestion
//!
//! Asks the model to propose ticker symbols for an industry through a
//! function call. Unlike the free-text ranking, this path enforces its
//! schema: the tool-call arguments must parse as `{"tickers": [string]}`
//! or the call fails.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use verdict_llm::tools::schema;
use verdict_llm::{
    CompletionRequest, ContentBlock, LlmProvider, Message, ToolDefinition,
};

const PROPOSE_TICKERS_TOOL: &str = "propose_tickers";

#[derive(Debug, Deserialize)]
struct ProposedTickers {
    tickers: Vec<String>,
}

/// Build the tool definition for ticker suggestion
fn propose_tickers_tool(count: usize) -> ToolDefinition {
    ToolDefinition::new(
        PROPOSE_TICKERS_TOOL,
        format!("Propose up to {count} stock ticker symbols worth analyzing"),
        schema::object(
            json!({
                "tickers": schema::array(
                    "Stock exchange ticker symbols",
                    schema::string("A ticker symbol, e.g. MSFT"),
                ),
            }),
            vec!["tickers"],
        ),
    )
}

/// Ask the model for up to `count` tickers in the given industry
///
/// Returns the proposed symbols, uppercased and truncated to `count`.
pub async fn suggest_tickers(
    provider: &dyn LlmProvider,
    config: &EngineConfig,
    industry: &str,
    count: usize,
) -> Result<Vec<String>> {
    info!(industry, count, "requesting ticker suggestions");

    let request = CompletionRequest::builder(&config.model)
        .system(format!(
            "You are a financial analyst. Propose publicly traded companies in the {industry} \
             industry that are worth analyzing. Respond by calling the {PROPOSE_TICKERS_TOOL} \
             function."
        ))
        .add_message(Message::user(format!(
            "Propose up to {count} stock tickers for the {industry} industry."
        )))
        .max_tokens(config.max_tokens)
        .temperature(config.temperature)
        .tools(vec![propose_tickers_tool(count)])
        .build();

    let response = provider.complete(request).await?;
    parse_suggestion(&response.message, count)
}

/// Extract and validate the tool-call payload from the response message
fn parse_suggestion(message: &Message, count: usize) -> Result<Vec<String>> {
    let input = message
        .tool_uses()
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { name, input, .. } if name == PROPOSE_TICKERS_TOOL => {
                Some(input.clone())
            }
            _ => None,
        })
        .ok_or_else(|| {
            EngineError::MalformedSuggestion("model did not call the tool".to_string())
        })?;

    let proposed: ProposedTickers = serde_json::from_value(input)
        .map_err(|e| EngineError::MalformedSuggestion(e.to_string()))?;

    if proposed.tickers.is_empty() {
        return Err(EngineError::MalformedSuggestion(
            "empty ticker list".to_string(),
        ));
    }

    Ok(proposed
        .tickers
        .into_iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .take(count)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_llm::{MessageContent, Role};

    fn tool_message(input: serde_json::Value) -> Message {
        Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: PROPOSE_TICKERS_TOOL.to_string(),
                input,
            }])),
        }
    }

    #[test]
    fn test_parse_valid_suggestion() {
        let message = tool_message(json!({"tickers": ["msft", " aapl ", "GOOG"]}));
        let tickers = parse_suggestion(&message, 10).unwrap();
        assert_eq!(tickers, vec!["MSFT", "AAPL", "GOOG"]);
    }

    #[test]
    fn test_parse_truncates_to_count() {
        let message = tool_message(json!({"tickers": ["A", "B", "C", "D"]}));
        let tickers = parse_suggestion(&message, 2).unwrap();
        assert_eq!(tickers, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let message = tool_message(json!({"symbols": ["MSFT"]}));
        let result = parse_suggestion(&message, 10);
        assert!(matches!(result, Err(EngineError::MalformedSuggestion(_))));
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        let message = Message::assistant("MSFT, AAPL");
        let result = parse_suggestion(&message, 10);
        assert!(matches!(result, Err(EngineError::MalformedSuggestion(_))));
    }

    #[test]
    fn test_parse_rejects_empty_list() {
        let message = tool_message(json!({"tickers": []}));
        let result = parse_suggestion(&message, 10);
        assert!(matches!(result, Err(EngineError::MalformedSuggestion(_))));
    }
}
