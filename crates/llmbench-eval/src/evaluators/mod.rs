//! Benchmark evaluators
//!
//! An [`Evaluator`] owns everything benchmark-specific: which corpus splits
//! it reads, how a prompt is built and how a response is scored. The shared
//! run loop lives in [`run_benchmark`] and walks
//! `Loading → (Formatting → Calling → Processing)* → Aggregating → Done`.
//!
//! The set of benchmarks is closed; [`BenchmarkKind`] maps names to
//! evaluators at compile time.

mod few_shot;
mod gsm8k;
mod humaneval;
mod math;
mod mmlu;
mod registry;
mod run;

pub use few_shot::sample_few_shot;
pub use gsm8k::{Gsm8kEvaluator, extract_last_number, parse_ground_truth};
pub use humaneval::{HumanEvalEvaluator, build_program, strip_code_fences};
pub use math::{MathEvaluator, last_boxed, normalize_answer};
pub use mmlu::{MmluEvaluator, answer_letter, extract_choice};
pub use registry::BenchmarkKind;
pub use run::{RunContext, run_benchmark};

use async_trait::async_trait;
use llmbench_core::{BenchResult, BenchmarkConfig, Prompt};
use rand::rngs::StdRng;
use serde::de::DeserializeOwned;

use crate::corpus::CorpusLoader;
use crate::metrics::{SampleResult, accuracy};

/// Samples to score plus the optional few-shot pool
pub type LoadedData<S> = (Vec<S>, Option<Vec<S>>);

/// Benchmark-specific behavior plugged into the shared run loop
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Corpus sample type
    type Sample: DeserializeOwned + Send + Sync + 'static;

    /// Benchmark name, also the corpus directory name
    fn benchmark_name(&self) -> &'static str;

    /// Load the samples to score and the few-shot pool
    fn load_data(
        &self,
        loader: &CorpusLoader,
        config: &BenchmarkConfig,
    ) -> BenchResult<LoadedData<Self::Sample>>;

    /// Build the prompt for one sample
    fn format_prompt(
        &self,
        sample: &Self::Sample,
        pool: Option<&[Self::Sample]>,
        config: &BenchmarkConfig,
        rng: &mut StdRng,
    ) -> Prompt;

    /// Score one response
    async fn process_response(&self, response: &str, sample: &Self::Sample) -> SampleResult;

    /// Benchmark score from all sample results
    fn aggregate(&self, results: &[SampleResult]) -> f64 {
        accuracy(results)
    }
}
