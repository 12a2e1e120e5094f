//! Evaluation orchestration
//!
//! [`Orchestrator`] fans a model's benchmarks out as concurrent tasks and
//! gathers their summaries. Progress is surfaced through an optional
//! callback so front-ends can render it however they like.

mod orchestrator;
mod progress;

pub use orchestrator::Orchestrator;
pub use progress::{BenchmarkProgress, ProgressCallback, RunPhase};

use llmbench_core::{BenchResult, EvaluationConfig, ModelConfig};

use crate::metrics::BenchmarkResult;

/// Evaluate one model on every configured benchmark
pub async fn run_model_evaluation(
    model: &ModelConfig,
    config: &EvaluationConfig,
) -> BenchResult<Vec<BenchmarkResult>> {
    Orchestrator::new(config.clone())
        .run_model_evaluation(model)
        .await
}
