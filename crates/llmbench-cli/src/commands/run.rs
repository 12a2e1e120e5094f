//! `llmbench run`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;
use llmbench_core::config::{load_config, ReportFormat};
use llmbench_core::{BenchResult, Config, ModelConfig};
use llmbench_eval::metrics::overall_score;
use llmbench_eval::{BenchmarkResult, Orchestrator, ReportWriter};
use tokio::task::JoinSet;

use crate::console;
use crate::progress::ProgressBoard;

/// Command-line overrides for a run
#[derive(Debug, Default)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub benchmarks: Option<Vec<String>>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub formats: Option<Vec<ReportFormat>>,
    pub parallel_models: bool,
}

impl RunOptions {
    fn apply(&self, config: &mut Config) {
        let evaluation = &mut config.evaluation;
        if let Some(benchmarks) = &self.benchmarks {
            evaluation.benchmarks = benchmarks.clone();
        }
        if let Some(dir) = &self.data_dir {
            evaluation.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            evaluation.output_dir = dir.clone();
        }
        if let Some(formats) = &self.formats {
            evaluation.report_formats = formats.clone();
        }
    }
}

/// Evaluate every configured model and write their reports
pub async fn run(options: RunOptions) -> Result<()> {
    let mut config = load_config(&options.config_path)
        .with_context(|| format!("cannot load {}", options.config_path.display()))?;
    options.apply(&mut config);

    tracing::info!(
        models = config.models.len(),
        benchmarks = ?config.evaluation.benchmarks,
        parallel_models = options.parallel_models,
        "starting llmbench"
    );

    let started = Instant::now();
    let board = ProgressBoard::new();
    let orchestrator =
        Arc::new(Orchestrator::new(config.evaluation.clone()).with_progress(board.callback()));

    let outcomes = if options.parallel_models {
        evaluate_parallel(&orchestrator, &config.models).await
    } else {
        evaluate_sequential(&orchestrator, &config.models).await
    };

    let writer = ReportWriter::new(
        &config.evaluation.output_dir,
        config.evaluation.report_formats.clone(),
    );

    let mut reported = 0;
    for (model, outcome) in outcomes {
        match outcome {
            Ok(results) if results.is_empty() => {
                console::warn(&format!("No results were generated for model {}", model));
            }
            Ok(results) => {
                print_summary(&model, &results);
                match writer.write(&results, &model) {
                    Ok(paths) => {
                        reported += 1;
                        for path in paths {
                            console::success(&format!("Report written to {}", path.display()));
                        }
                    }
                    Err(e) => {
                        tracing::error!(model = %model, error = %e, "failed to write report");
                        console::error(&format!("Failed to write report for {}: {}", model, e));
                    }
                }
            }
            Err(e) => {
                tracing::error!(model = %model, error = %e, "model evaluation failed");
                console::error(&format!("Evaluation of {} failed: {}", model, e));
            }
        }
    }

    println!(
        "\n{} {} of {} models reported in {:.1}s (finished {})",
        "Done:".bold(),
        reported,
        config.models.len(),
        started.elapsed().as_secs_f64(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

type ModelOutcome = (String, BenchResult<Vec<BenchmarkResult>>);

async fn evaluate_sequential(
    orchestrator: &Orchestrator,
    models: &[ModelConfig],
) -> Vec<ModelOutcome> {
    let mut outcomes = Vec::with_capacity(models.len());
    for model in models {
        tracing::info!(model = %model.name, "--- starting evaluation ---");
        let outcome = orchestrator.run_model_evaluation(model).await;
        tracing::info!(model = %model.name, "--- finished evaluation ---");
        outcomes.push((model.name.clone(), outcome));
    }
    outcomes
}

/// Models run concurrently; outcomes keep the configured model order
async fn evaluate_parallel(
    orchestrator: &Arc<Orchestrator>,
    models: &[ModelConfig],
) -> Vec<ModelOutcome> {
    let mut tasks = JoinSet::new();
    for (index, model) in models.iter().cloned().enumerate() {
        let orchestrator = Arc::clone(orchestrator);
        tasks.spawn(async move {
            let outcome = orchestrator.run_model_evaluation(&model).await;
            (index, model.name, outcome)
        });
    }

    let mut outcomes: Vec<(usize, ModelOutcome)> = Vec::with_capacity(models.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, name, outcome)) => outcomes.push((index, (name, outcome))),
            Err(e) => tracing::error!(error = %e, "model evaluation task panicked"),
        }
    }
    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

fn print_summary(model: &str, results: &[BenchmarkResult]) {
    let mut sorted: Vec<&BenchmarkResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.benchmark.cmp(&b.benchmark));

    console::header(&format!("Results for {}", model));
    println!(
        "{:<12} {:>10} {:>9} {:>9} {:>7} {:>9}",
        "Benchmark", "Score", "Samples", "Correct", "Failed", "Duration"
    );
    for result in sorted {
        let failed = format!("{:>7}", result.failed_calls);
        println!(
            "{:<12} {:>10} {:>9} {:>9} {} {:>8.1}s",
            result.benchmark,
            result.score_percentage(),
            result.total_samples,
            result.correct_samples,
            if result.failed_calls > 0 {
                failed.yellow()
            } else {
                failed.normal()
            },
            result.duration_secs
        );
    }
    println!("{:<12} {}", "Overall", console::score(overall_score(results)));
}
