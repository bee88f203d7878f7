//! LLM module - chat completion client abstraction

mod client;
mod mock_client;
mod openai;

pub use client::{
    CompletionRequest, CompletionResponse, LlmClient, Message, Role,
};
pub use mock_client::{MockLlmClient, MockStep, MockStepKind};
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIClient};
