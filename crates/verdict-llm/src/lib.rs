//! LLM chat-completion abstraction for stock-verdict
//!
//! This crate provides provider-agnostic abstractions for interacting with
//! chat-completion services. It includes:
//!
//! - Message types for role-tagged conversations
//! - Completion request/response types
//! - Tool definitions for the structured function-call path
//! - Provider trait for LLM implementations
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LlmProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
