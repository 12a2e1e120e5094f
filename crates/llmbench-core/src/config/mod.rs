//! Configuration for benchmark runs
//!
//! The configuration surface is read once before any evaluation starts.
//! Everything here is immutable for the duration of a run.

mod evaluation;
mod loader;
mod model;

pub use evaluation::{
    ApiParams, BenchmarkConfig, BenchmarkOverrides, EvaluationConfig, ReportFormat,
};
pub use loader::{load_config, load_config_from_str, ConfigFormat};
pub use model::{Config, ModelConfig};
