//! Retry logic for chat requests

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use super::types::ApiClient;
use crate::llm::ApiError;

/// Bounded exponential backoff.
///
/// Between attempt `n` and `n + 1` (0-based) the client waits
/// `initial_delay * backoff_factor^n`. With the defaults that is 1s, 2s, 4s
/// and 8s across five attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_delay: Duration,
    /// Multiplier applied per attempt
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that tries exactly once
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay before the attempt following the 0-based `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        self.initial_delay
            .mul_f64(self.backoff_factor.powi(exponent))
    }

    /// All waits a fully failing call goes through
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_for(attempt))
            .collect()
    }
}

impl ApiClient {
    /// Execute a request with retry logic and exponential backoff.
    ///
    /// Only transient errors are retried. Non-retryable errors return
    /// immediately. When every attempt fails transiently the result is
    /// [`ApiError::RetriesExhausted`].
    pub(super) async fn execute_with_retry<F, Fut>(&self, operation: F) -> Result<String, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<String, ApiError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..max_attempts {
            match operation().await {
                Ok(text) => {
                    if attempt > 0 {
                        tracing::info!(attempt = attempt + 1, "request succeeded after retry");
                    }
                    return Ok(text);
                }
                Err(error) if !error.is_transient() => {
                    tracing::error!(error = %error, "non-retryable API error");
                    return Err(error);
                }
                Err(error) => {
                    if attempt + 1 < max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        tracing::warn!(
                            attempt = attempt + 1,
                            max_attempts,
                            delay_secs = delay.as_secs_f64(),
                            error = %error,
                            "API error, retrying"
                        );
                        sleep(delay).await;
                    } else {
                        tracing::error!(attempts = max_attempts, error = %error, "max retries reached");
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: max_attempts,
            last: Box::new(
                last_error.unwrap_or_else(|| ApiError::transient(None, "no attempt was made")),
            ),
        })
    }
}
