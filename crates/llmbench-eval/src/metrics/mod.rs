//! Per-sample and per-benchmark results
//!
//! Samples are scored one at a time into a [`SampleCollector`]; the
//! aggregation helpers turn those into benchmark and model level scores.

mod aggregator;
mod collector;
mod types;

pub use aggregator::{accuracy, overall_score, pass_at_1};
pub use collector::SampleCollector;
pub use types::{BenchmarkResult, PassAtK, SampleResult, API_CALL_FAILED};
