//! Shared per-benchmark run loop

use std::sync::Arc;

use llmbench_core::{ApiClient, BenchResult, BenchmarkConfig, ModelConfig, SandboxConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Evaluator;
use crate::corpus::CorpusLoader;
use crate::metrics::{BenchmarkResult, SampleCollector};
use crate::runner::{BenchmarkProgress, ProgressCallback, RunPhase};

/// Everything one benchmark task needs, owned so it can move into a task
#[derive(Clone)]
pub struct RunContext {
    /// Model under evaluation
    pub model: Arc<ModelConfig>,
    /// Client shared by all benchmarks of the model
    pub client: Arc<ApiClient>,
    /// Corpus access
    pub loader: Arc<CorpusLoader>,
    /// Resolved settings for this benchmark
    pub config: BenchmarkConfig,
    /// Sandbox used by code-execution benchmarks
    pub sandbox: SandboxConfig,
    /// Optional progress sink
    pub progress: Option<ProgressCallback>,
}

impl RunContext {
    fn report(&self, benchmark: &str, phase: RunPhase, completed: usize, total: usize, correct: usize) {
        if let Some(callback) = &self.progress {
            callback(BenchmarkProgress {
                model: self.model.name.clone(),
                benchmark: benchmark.to_string(),
                phase,
                completed,
                total,
                correct,
            });
        }
    }
}

/// Run one benchmark to completion.
///
/// Samples are processed strictly in corpus order, one at a time. A failed
/// API call becomes a failed sample and the loop moves on; only a corpus
/// error aborts the run.
pub async fn run_benchmark<E: Evaluator>(
    evaluator: &E,
    ctx: &RunContext,
) -> BenchResult<BenchmarkResult> {
    let benchmark = evaluator.benchmark_name();
    let config = &ctx.config;

    ctx.report(benchmark, RunPhase::Loading, 0, 0, 0);
    let (samples, pool) = evaluator.load_data(&ctx.loader, config)?;
    let total = samples.len();

    tracing::info!(
        benchmark,
        model = %ctx.model.name,
        samples = total,
        pool = pool.as_ref().map_or(0, Vec::len),
        "starting benchmark"
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut collector = SampleCollector::new();

    for (index, sample) in samples.iter().enumerate() {
        let correct = collector.correct_count();

        ctx.report(benchmark, RunPhase::Formatting, index, total, correct);
        let prompt = evaluator.format_prompt(sample, pool.as_deref(), config, &mut rng);

        ctx.report(benchmark, RunPhase::Calling, index, total, correct);
        match ctx
            .client
            .call(&prompt, config.max_tokens, config.temperature)
            .await
        {
            Ok(response) => {
                ctx.report(benchmark, RunPhase::Processing, index, total, correct);
                let result = evaluator.process_response(&response, sample).await;
                collector.record(result.with_response(response));
            }
            Err(error) => {
                tracing::warn!(benchmark, sample = index, error = %error, "API call failed");
                collector.record_api_failure();
            }
        }
    }

    ctx.report(benchmark, RunPhase::Aggregating, total, total, collector.correct_count());
    let score = evaluator.aggregate(collector.results());
    let result = collector.finish(benchmark, &ctx.model.name, score);

    tracing::info!(
        benchmark,
        model = %ctx.model.name,
        score = result.score,
        correct = result.correct_samples,
        total = result.total_samples,
        failed_calls = result.failed_calls,
        duration_secs = result.duration_secs,
        "benchmark finished"
    );
    ctx.report(benchmark, RunPhase::Done, total, total, result.correct_samples);

    Ok(result)
}
