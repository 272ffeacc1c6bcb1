//! Configuration for the analysis pipeline

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
const DEFAULT_TEMPERATURE: f32 = 0.1;
const DEFAULT_MAX_TOKENS: usize = 1024;
const DEFAULT_LOOKBACK_YEARS: u32 = 1;
const DEFAULT_NEWS_LIMIT: usize = 8;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Model identifier sent with every completion request
    pub model: String,

    /// Sampling temperature for every stage
    pub temperature: f32,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Price history lookback window in years
    pub lookback_years: u32,

    /// Maximum news articles fed into the sentiment stage
    pub news_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            news_limit: DEFAULT_NEWS_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Override the model from the `OPENAI_MODEL` environment variable
    /// when it is set
    pub fn from_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.model = model;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(EngineError::Config("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(EngineError::Config(format!(
                "temperature {} out of range 0.0..=2.0",
                self.temperature
            )));
        }
        if self.lookback_years == 0 {
            return Err(EngineError::Config(
                "lookback_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    lookback_years: Option<u32>,
    news_limit: Option<usize>,
}

impl EngineConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the price history lookback in years
    pub fn lookback_years(mut self, years: u32) -> Self {
        self.lookback_years = Some(years);
        self
    }

    /// Set the news article cap for the sentiment stage
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            lookback_years: self.lookback_years.unwrap_or(defaults.lookback_years),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo-0125");
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::builder()
            .model("gpt-4o-mini")
            .lookback_years(2)
            .news_limit(3)
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.lookback_years, 2);
        assert_eq!(config.news_limit, 3);
    }

    #[test]
    fn test_validation_rejects_zero_lookback() {
        let result = EngineConfig::builder().lookback_years(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let result = EngineConfig::builder().model("").build();
        assert!(result.is_err());
    }
}
