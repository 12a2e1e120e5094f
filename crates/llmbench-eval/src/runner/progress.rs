//! Progress reporting for benchmark runs

use std::fmt;
use std::sync::Arc;

/// Callback for progress updates during evaluation
///
/// Shared by every benchmark task of a model, so it must be cheap and
/// must not block.
pub type ProgressCallback = Arc<dyn Fn(BenchmarkProgress) + Send + Sync>;

/// Where a benchmark run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Loading,
    Formatting,
    Calling,
    Processing,
    Aggregating,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Loading => "loading",
            RunPhase::Formatting => "formatting",
            RunPhase::Calling => "calling",
            RunPhase::Processing => "processing",
            RunPhase::Aggregating => "aggregating",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Progress update during evaluation
#[derive(Debug, Clone)]
pub struct BenchmarkProgress {
    /// Model display name
    pub model: String,
    /// Benchmark name
    pub benchmark: String,
    /// Current phase
    pub phase: RunPhase,
    /// Samples finished so far
    pub completed: usize,
    /// Samples in the run (0 while loading)
    pub total: usize,
    /// Correct samples so far
    pub correct: usize,
}
