//! Sandbox process executor

#[cfg(unix)]
mod channel;
mod executor;
#[cfg(unix)]
mod limits;
#[cfg(unix)]
mod runtime;
mod types;


pub use executor::SandboxExecutor;
pub use types::{ExecutionOutcome, ExecutionReason};
