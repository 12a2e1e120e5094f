//! Client type definitions

use std::sync::Arc;

use tracing::instrument;

use super::RetryPolicy;
use crate::config::ModelConfig;
use crate::error::BenchResult;
use crate::llm::{ApiError, ChatMessage, ChatRequest, ChatTransport, OpenAiTransport};

/// Client for one model endpoint.
///
/// # Examples
///
/// ```no_run
/// use llmbench_core::config::ModelConfig;
/// use llmbench_core::llm::{ApiClient, ChatMessage};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let model = ModelConfig::new("gpt", "sk-...", "https://api.openai.com/v1", "gpt-4o-mini");
/// let client = ApiClient::for_model(&model)?;
///
/// match client.call(&[ChatMessage::user("What is 6 * 7?")], 64, 0.0).await {
///     Ok(text) => println!("{}", text),
///     Err(e) => eprintln!("call failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    pub(super) model_name: String,
    pub(super) display_name: String,
    pub(super) transport: Arc<dyn ChatTransport>,
    pub(super) policy: RetryPolicy,
}

impl ApiClient {
    /// Create a client that talks HTTP to the model's endpoint
    pub fn for_model(model: &ModelConfig) -> BenchResult<Self> {
        let transport = OpenAiTransport::new(model)?;
        Ok(Self::with_transport(model, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(model: &ModelConfig, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            model_name: model.model_name.clone(),
            display_name: model.name.clone(),
            transport,
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The retry policy in use
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Request one completion.
    ///
    /// Transient failures are retried per the [`RetryPolicy`]; anything else
    /// returns immediately. The error is a value, never a panic.
    #[instrument(skip(self, messages), fields(model = %self.display_name))]
    pub async fn call(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ApiError> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: messages.to_vec(),
            max_tokens,
            temperature,
        };

        self.execute_with_retry(|| self.transport.complete(&request))
            .await
    }
}
