//! ChatRelay AI - session-keyed chat relay
//!
//! This crate provides:
//! - OpenAI-compatible chat completion client behind the `LlmClient` trait
//! - Scripted mock client for tests
//! - Rolling per-session conversation history
//! - Rate-limit cooldown, minimum reply latency and in-band `#CMD#` commands

pub mod error;
mod http_client;
pub mod llm;
pub mod relay;

// Re-export commonly used types
pub use error::{AiError, FailureKind, Result};
pub use llm::{
    CompletionRequest, CompletionResponse, LlmClient, Message, MockLlmClient, MockStep,
    OpenAIClient, Role,
};
pub use relay::{Answer, ChatRelay, ConversationStore, RelayConfig};
