//! HTTP transport for OpenAI-compatible chat completions

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiError, ChatMessage};
use crate::config::ModelConfig;
use crate::error::BenchResult;

/// Body of a chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Ordered prompt messages
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// One attempt at a chat completion
///
/// Implementations perform exactly one exchange with the endpoint and
/// classify any failure; retrying is the client's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the request and return the completion text
    async fn complete(&self, request: &ChatRequest) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Transport speaking the `/chat/completions` protocol over reqwest
pub struct OpenAiTransport {
    http_client: Client,
    url: String,
    api_key: String,
}

impl OpenAiTransport {
    /// Build a transport for one model; the request timeout applies per attempt
    pub fn new(model: &ModelConfig) -> BenchResult<Self> {
        let http_client = Client::builder().timeout(model.request_timeout).build()?;
        Ok(Self {
            http_client,
            url: model.completions_url(),
            api_key: model.api_key.clone(),
        })
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    #[instrument(skip(self, request), level = "debug", fields(model = %request.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<String, ApiError> {
        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), error_text));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        extract_completion(body)
    }
}

fn extract_completion(body: CompletionResponse) -> Result<String, ApiError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::non_retryable(None, "response contained no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| ApiError::non_retryable(None, "response choice has no content"))
}
