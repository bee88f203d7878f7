//! OpenAI-compatible LLM provider

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};
use crate::http_client::build_http_client;
use crate::llm::client::{CompletionRequest, CompletionResponse, LlmClient, Message};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// Keep large or sensitive error bodies out of replies and logs.
const MAX_ERROR_BODY: usize = 512;

/// OpenAI client
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(None)?,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set custom base URL (self-hosted or third-party relays)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Route every request through an HTTP(S) proxy
    pub fn with_proxy(mut self, proxy: &str) -> Result<Self> {
        self.client = build_http_client(Some(proxy))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

#[async_trait]
impl LlmClient for OpenAIClient {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = OpenAIRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Sending OpenAI chat completion"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    AiError::Connection(e.to_string())
                } else {
                    AiError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(response_to_error(response, "OpenAI").await);
        }

        let data: OpenAIResponse = response.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::InvalidFormat("No choices in OpenAI response".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content,
        })
    }
}

async fn response_to_error(response: Response, provider: &str) -> AiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<OpenAIErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);

    AiError::LlmHttp {
        provider: provider.to_string(),
        status,
        message: truncate_message(message),
    }
}

fn truncate_message(message: String) -> String {
    if message.len() <= MAX_ERROR_BODY {
        return message;
    }
    let mut end = MAX_ERROR_BODY;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &message[..end])
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::error::FailureKind;

    fn client_for(server: &MockServer) -> OpenAIClient {
        OpenAIClient::new("sk-test")
            .expect("client should build")
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_complete_parses_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.5,
                "messages": [{"role": "user", "content": "ping"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "pong"},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .complete(CompletionRequest::new(vec![Message::user("ping")]).with_temperature(0.5))
            .await
            .expect("completion should succeed");

        assert_eq!(response.content.as_deref(), Some("pong"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Authentication);
        assert_eq!(err.api_message(), Some("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_too_many_requests_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::RateLimited);
        assert_eq!(err.api_message(), Some("slow down"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::InvalidFormat(_)));
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_connection() {
        let client = OpenAIClient::new("sk-test")
            .expect("client should build")
            .with_base_url("http://127.0.0.1:1");

        let err = client
            .complete(CompletionRequest::new(vec![Message::user("ping")]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Connection);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAIClient::new("sk-test")
            .expect("client should build")
            .with_base_url("https://relay.example.com/v1/");
        assert_eq!(client.base_url(), "https://relay.example.com/v1");
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let truncated = truncate_message(long);
        assert!(truncated.ends_with("... [truncated]"));
        assert_eq!(truncated.len(), MAX_ERROR_BODY + "... [truncated]".len());
    }
}
