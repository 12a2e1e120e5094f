//! Chat-completion client
//!
//! [`ApiClient`] issues a single chat-completion request and retries
//! transient failures with exponential backoff. The HTTP exchange itself sits
//! behind [`ChatTransport`] so the retry policy can be exercised without a
//! network.

pub mod client;
mod error;
mod messages;
mod transport;

pub use client::{ApiClient, RetryPolicy};
pub use error::ApiError;
pub use messages::{ChatMessage, MessageRole, Prompt};
pub use transport::{ChatRequest, ChatTransport, OpenAiTransport};
