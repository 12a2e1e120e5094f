//! Concurrent evaluation of one model across benchmarks

use std::sync::Arc;

use llmbench_core::{ApiClient, BenchResult, EvaluationConfig, ModelConfig};
use tokio::task::JoinSet;

use super::progress::ProgressCallback;
use crate::corpus::CorpusLoader;
use crate::evaluators::{BenchmarkKind, RunContext};
use crate::metrics::BenchmarkResult;

/// Drives every configured benchmark for one model
///
/// Each resolved benchmark runs as its own tokio task; results come back in
/// completion order. Tasks share nothing mutable: the client and corpus
/// loader are behind `Arc`, everything else is cloned into the task.
pub struct Orchestrator {
    config: EvaluationConfig,
    loader: Arc<CorpusLoader>,
    progress: Option<ProgressCallback>,
}

impl Orchestrator {
    /// Create an orchestrator for an evaluation config
    pub fn new(config: EvaluationConfig) -> Self {
        let loader = Arc::new(CorpusLoader::new(&config.data_dir));
        Self {
            config,
            loader,
            progress: None,
        }
    }

    /// Set progress callback
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// The evaluation config in use
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Resolve configured names; unknown names are logged and dropped
    pub fn resolve_benchmarks(&self) -> Vec<BenchmarkKind> {
        let mut kinds = Vec::new();
        for name in &self.config.benchmarks {
            match BenchmarkKind::from_name(name) {
                Some(kind) if kinds.contains(&kind) => {
                    tracing::warn!(benchmark = %name, "benchmark listed twice, running once");
                }
                Some(kind) => kinds.push(kind),
                None => tracing::warn!(benchmark = %name, "unknown benchmark, skipping"),
            }
        }
        kinds
    }

    /// Evaluate a model over HTTP
    pub async fn run_model_evaluation(&self, model: &ModelConfig) -> BenchResult<Vec<BenchmarkResult>> {
        let client = ApiClient::for_model(model)?;
        Ok(self.run_with_client(model, Arc::new(client)).await)
    }

    /// Evaluate a model through an existing client.
    ///
    /// Benchmarks that fail (corpus errors, panics) are logged and left out
    /// of the returned results.
    pub async fn run_with_client(
        &self,
        model: &ModelConfig,
        client: Arc<ApiClient>,
    ) -> Vec<BenchmarkResult> {
        let kinds = self.resolve_benchmarks();
        if kinds.is_empty() {
            tracing::warn!(model = %model.name, "no runnable benchmarks configured");
            return Vec::new();
        }

        tracing::info!(
            model = %model.name,
            benchmarks = kinds.len(),
            "starting model evaluation"
        );

        let model = Arc::new(model.clone());
        let mut tasks = JoinSet::new();
        for kind in kinds {
            let ctx = RunContext {
                model: Arc::clone(&model),
                client: Arc::clone(&client),
                loader: Arc::clone(&self.loader),
                config: self.config.benchmark_config(kind.name()),
                sandbox: self.config.sandbox.clone(),
                progress: self.progress.clone(),
            };
            tasks.spawn(async move { (kind, kind.run(ctx).await) });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(result))) => results.push(result),
                Ok((kind, Err(error))) => {
                    tracing::error!(benchmark = %kind, error = %error, "benchmark failed");
                }
                Err(error) => {
                    tracing::error!(error = %error, "benchmark task panicked or was cancelled");
                }
            }
        }

        tracing::info!(
            model = %model.name,
            completed = results.len(),
            "model evaluation finished"
        );
        results
    }
}
