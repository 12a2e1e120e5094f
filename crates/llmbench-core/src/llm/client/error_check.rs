//! Error classification for retry logic

use crate::llm::ApiError;

impl ApiError {
    /// Classify an HTTP error status.
    ///
    /// # Retryable statuses
    ///
    /// - 408 (Request Timeout)
    /// - 409 (Conflict)
    /// - 429 (Too Many Requests)
    /// - any 5xx
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            "empty error body".to_string()
        } else {
            body
        };

        match status {
            408 | 409 | 429 | 500..=599 => ApiError::transient(Some(status), message),
            _ => ApiError::non_retryable(Some(status), message),
        }
    }

    /// Classify a reqwest failure.
    ///
    /// Connection, timeout and body transfer failures are network-level and
    /// retryable. A body that arrived but does not decode is not.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let status = error.status().map(|s| s.as_u16());
        if let Some(code) = status {
            return ApiError::from_status(code, error.to_string());
        }

        if error.is_decode() || error.is_builder() {
            ApiError::non_retryable(None, error.to_string())
        } else {
            ApiError::transient(None, error.to_string())
        }
    }

    /// Whether a retry may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transient { .. })
    }
}
