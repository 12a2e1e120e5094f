//! Core engine for llmbench
//!
//! This crate holds the pieces of the benchmark runner that have real
//! failure and isolation requirements:
//!
//! - **Chat client**: one chat-completion request against an
//!   OpenAI-compatible endpoint, with bounded exponential-backoff retries
//! - **Sandbox**: execution of untrusted, model-generated code in a child
//!   process with rlimits, a hard deadline and a one-shot result pipe
//! - **Configuration**: the model and benchmark settings every run reads
//!
//! # Example
//!
//! ```rust,ignore
//! use llmbench_core::config::load_config;
//! use llmbench_core::llm::{ApiClient, ChatMessage};
//!
//! let config = load_config("configs/config.yaml")?;
//! let client = ApiClient::for_model(&config.models[0])?;
//! let text = client.call(&[ChatMessage::user("2 + 2 = ?")], 64, 0.0).await?;
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod sandbox;

// Re-exports for convenience
pub use config::{BenchmarkConfig, Config, EvaluationConfig, ModelConfig};
pub use error::{BenchError, BenchResult};
pub use llm::{ApiClient, ApiError, ChatMessage, MessageRole, Prompt};
pub use sandbox::{ExecutionOutcome, ExecutionReason, SandboxConfig, SandboxError, SandboxExecutor};
