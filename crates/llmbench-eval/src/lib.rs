//! Benchmark evaluation for llmbench
//!
//! This crate turns a configured model into benchmark scores:
//!
//! - **Corpora**: JSON Lines splits for GSM8K, MATH, MMLU and HumanEval
//! - **Evaluators**: prompt construction and answer scoring per benchmark
//! - **Orchestration**: every benchmark of a model runs as its own task
//! - **Reports**: Markdown and JSON summaries per model
//!
//! # Example
//!
//! ```rust,ignore
//! use llmbench_core::config::load_config;
//! use llmbench_eval::{Orchestrator, ReportWriter};
//!
//! let config = load_config("configs/config.yaml")?;
//! let orchestrator = Orchestrator::new(config.evaluation.clone());
//! for model in &config.models {
//!     let results = orchestrator.run_model_evaluation(model).await?;
//!     ReportWriter::new(&config.evaluation.output_dir, config.evaluation.report_formats.clone())
//!         .write(&results, &model.name)?;
//! }
//! ```

pub mod corpus;
pub mod evaluators;
pub mod metrics;
pub mod report;
pub mod runner;

// Re-exports for convenience
pub use corpus::CorpusLoader;
pub use evaluators::{BenchmarkKind, Evaluator, RunContext};
pub use metrics::{BenchmarkResult, PassAtK, SampleResult};
pub use report::ReportWriter;
pub use runner::{
    BenchmarkProgress, Orchestrator, ProgressCallback, RunPhase, run_model_evaluation,
};
