//! Chat client with retry
//!
//! One [`ApiClient`] serves a single model. Each `call` owns its own retry
//! counter, so overlapping calls from concurrent benchmarks never share
//! backoff state.

mod error_check;
mod retry;
#[cfg(test)]
mod tests;
mod types;

pub use retry::RetryPolicy;
pub use types::ApiClient;
