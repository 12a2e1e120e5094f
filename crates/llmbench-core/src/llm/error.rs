//! Errors from the model endpoint

use thiserror::Error;

/// Failure of a chat-completion call
///
/// The client never panics or propagates past its boundary with anything
/// other than this value; callers fold it into a failed sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Server or network-level failure worth retrying
    #[error("Transient API error{}: {message}", fmt_status(.status))]
    Transient { status: Option<u16>, message: String },

    /// Failure that will not go away on retry (bad request, auth, bad body)
    #[error("API error{}: {message}", fmt_status(.status))]
    NonRetryable { status: Option<u16>, message: String },

    /// Every attempt failed with a transient error
    #[error("API call failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ApiError> },
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}

impl ApiError {
    /// Create a transient error
    pub fn transient(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transient {
            status,
            message: message.into(),
        }
    }

    /// Create a non-retryable error
    pub fn non_retryable(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::NonRetryable {
            status,
            message: message.into(),
        }
    }

    /// HTTP status attached to the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transient { status, .. } | Self::NonRetryable { status, .. } => *status,
            Self::RetriesExhausted { last, .. } => last.status(),
        }
    }
}
