//! Isolated execution of model-generated code
//!
//! Every call to [`SandboxExecutor::execute`] runs the code in a fresh child
//! process: own session and process group, throwaway working directory,
//! cleared environment, null stdin and rlimits. The child reports its
//! verdict over a one-shot pipe installed as fd 3; nothing else crosses the
//! process boundary.

mod config;
mod executor;
mod limits;

pub use config::{Runtime, SandboxConfig};
pub use executor::{ExecutionOutcome, ExecutionReason, SandboxExecutor};
pub use limits::ResourceLimits;

/// Result type for sandbox operations
pub type SandboxResult<T> = Result<T, SandboxError>;

/// Infrastructure failures of the sandbox itself
///
/// Failures of the executed code are never errors; they are reported
/// through [`ExecutionOutcome`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum SandboxError {
    /// Temp directory, code file or result pipe could not be created
    #[error("Sandbox initialization failed: {0}")]
    InitializationFailed(String),

    /// Process spawn failed
    #[error("Failed to spawn sandboxed process: {0}")]
    SpawnFailed(String),

    /// Waiting on or killing the child failed
    #[error("Sandbox internal error: {0}")]
    Internal(String),

    /// No process isolation is available on this platform
    #[error("Sandboxed execution is not supported on this platform")]
    Unsupported,
}
