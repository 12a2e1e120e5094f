//! End-to-end runs of the orchestrator over a scripted chat transport
//!
//! The transport answers from the prompt text, so concurrent benchmarks can
//! share one client without depending on call order.

use std::fs;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use llmbench_core::config::BenchmarkOverrides;
use llmbench_core::llm::{ChatRequest, ChatTransport, RetryPolicy};
use llmbench_core::{ApiClient, ApiError, EvaluationConfig, ModelConfig};
use llmbench_eval::{BenchmarkProgress, Orchestrator, ProgressCallback, RunPhase};
use tempfile::TempDir;

type Script = dyn Fn(&str) -> Result<String, ApiError> + Send + Sync;

struct ScriptedTransport {
    script: Box<Script>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(script: impl Fn(&str) -> Result<String, ApiError> + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ApiError> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt.clone());
        (self.script)(&prompt)
    }
}

fn model() -> ModelConfig {
    ModelConfig::new("scripted/model", "sk-test", "http://localhost:9/v1", "scripted")
}

fn client(transport: Arc<ScriptedTransport>) -> Arc<ApiClient> {
    Arc::new(ApiClient::with_transport(&model(), transport).with_policy(RetryPolicy::no_retry()))
}

fn write_split(dir: &TempDir, benchmark: &str, split: &str, lines: &[&str]) {
    let bench_dir = dir.path().join(benchmark);
    fs::create_dir_all(&bench_dir).unwrap();
    fs::write(bench_dir.join(format!("{}.jsonl", split)), lines.join("\n")).unwrap();
}

fn zero_shot() -> BenchmarkOverrides {
    BenchmarkOverrides {
        k_shot: Some(0),
        ..Default::default()
    }
}

fn gsm8k_corpus(dir: &TempDir) {
    write_split(
        dir,
        "gsm8k",
        "test",
        &[
            r#"{"question":"What is 40 + 2?","answer":"40 + 2 = 42\n#### 42"}"#,
            "{\"question\":\"What is 2 * 3?\",\"answer\":\"#### 6\"}",
            "{\"question\":\"What is 10 - 1?\",\"answer\":\"#### 9\"}",
        ],
    );
}

/// 40 + 2 is answered correctly, 2 * 3 fails at the API, 10 - 1 is wrong
fn gsm8k_script(prompt: &str) -> Result<String, ApiError> {
    if prompt.contains("What is 40 + 2?") {
        Ok("Adding them gives 42.".to_string())
    } else if prompt.contains("What is 2 * 3?") {
        Err(ApiError::non_retryable(Some(400), "bad request"))
    } else {
        Ok("The answer is 11".to_string())
    }
}

#[tokio::test]
async fn test_gsm8k_run_records_every_sample() {
    let dir = TempDir::new().unwrap();
    gsm8k_corpus(&dir);

    let config = EvaluationConfig::with_benchmarks(["gsm8k"])
        .with_data_dir(dir.path())
        .with_override("gsm8k", zero_shot());
    let transport = Arc::new(ScriptedTransport::new(gsm8k_script));

    let results = Orchestrator::new(config)
        .run_with_client(&model(), client(Arc::clone(&transport)))
        .await;

    assert_eq!(results.len(), 1);
    let gsm8k = &results[0];
    assert_eq!(gsm8k.benchmark, "gsm8k");
    assert_eq!(gsm8k.model, "scripted/model");
    assert_eq!(gsm8k.total_samples, 3);
    assert_eq!(gsm8k.correct_samples, 1);
    assert_eq!(gsm8k.failed_calls, 1);
    assert!((gsm8k.score - 1.0 / 3.0).abs() < 1e-9);

    // Corpus order is preserved, including the failed call
    assert!(gsm8k.samples[0].correct);
    assert!(gsm8k.samples[1].is_api_failure());
    assert_eq!(gsm8k.samples[2].parsed_answer.as_deref(), Some("11"));

    // Zero-shot prompts carry only the question under test
    let prompts = transport.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[0].matches("Question:").count(), 1);
}

#[tokio::test]
async fn test_unknown_benchmark_is_skipped() {
    let dir = TempDir::new().unwrap();
    gsm8k_corpus(&dir);

    let config = EvaluationConfig::with_benchmarks(["gsm8k", "arc-challenge"])
        .with_data_dir(dir.path())
        .with_override("gsm8k", zero_shot());
    let transport = Arc::new(ScriptedTransport::new(gsm8k_script));

    let results = Orchestrator::new(config)
        .run_with_client(&model(), client(transport))
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].benchmark, "gsm8k");
}

#[tokio::test]
async fn test_no_resolvable_benchmarks_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let config = EvaluationConfig::with_benchmarks(["arc", "hellaswag"]).with_data_dir(dir.path());
    let transport = Arc::new(ScriptedTransport::new(|_| Ok(String::new())));

    let results = Orchestrator::new(config)
        .run_with_client(&model(), client(Arc::clone(&transport)))
        .await;

    assert!(results.is_empty());
    assert!(transport.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_corpus_drops_only_that_benchmark() {
    let dir = TempDir::new().unwrap();
    gsm8k_corpus(&dir);

    let config = EvaluationConfig::with_benchmarks(["gsm8k", "math"])
        .with_data_dir(dir.path())
        .with_override("gsm8k", zero_shot());
    let transport = Arc::new(ScriptedTransport::new(gsm8k_script));

    let results = Orchestrator::new(config)
        .run_with_client(&model(), client(transport))
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].benchmark, "gsm8k");
}

#[tokio::test]
async fn test_concurrent_benchmarks_share_one_client() {
    let dir = TempDir::new().unwrap();
    gsm8k_corpus(&dir);
    write_split(
        &dir,
        "mmlu",
        "test",
        &[
            r#"{"question":"Capital of France?","choices":["Berlin","Paris","Rome","Madrid"],"answer":1}"#,
            r#"{"question":"2 + 2?","choices":["3","5","4","22"],"answer":2}"#,
        ],
    );

    let config = EvaluationConfig::with_benchmarks(["gsm8k", "mmlu"])
        .with_data_dir(dir.path())
        .with_override("gsm8k", zero_shot())
        .with_override(
            "mmlu",
            BenchmarkOverrides {
                k_shot: Some(0),
                seed: Some(7),
                ..Default::default()
            },
        );
    let transport = Arc::new(ScriptedTransport::new(|prompt| {
        if prompt.starts_with("The following are multiple choice") {
            Ok("B".to_string())
        } else {
            gsm8k_script(prompt)
        }
    }));

    let mut results = Orchestrator::new(config)
        .run_with_client(&model(), client(transport))
        .await;
    results.sort_by(|a, b| a.benchmark.cmp(&b.benchmark));

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].benchmark, "gsm8k");
    assert_eq!(results[1].benchmark, "mmlu");
    assert_eq!(results[1].total_samples, 2);
    assert_eq!(results[1].correct_samples, 1);
    assert!((results[1].score - 0.5).abs() < 1e-9);
    assert_eq!(results[1].samples[0].correct_answer.as_deref(), Some("B"));
    assert_eq!(results[1].samples[1].correct_answer.as_deref(), Some("C"));
}

#[tokio::test]
async fn test_progress_reaches_done() {
    let dir = TempDir::new().unwrap();
    gsm8k_corpus(&dir);

    let seen: Arc<Mutex<Vec<BenchmarkProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: ProgressCallback = Arc::new(move |progress| sink.lock().unwrap().push(progress));

    let config = EvaluationConfig::with_benchmarks(["gsm8k"])
        .with_data_dir(dir.path())
        .with_override("gsm8k", zero_shot());
    let transport = Arc::new(ScriptedTransport::new(gsm8k_script));

    Orchestrator::new(config)
        .with_progress(callback)
        .run_with_client(&model(), client(transport))
        .await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.first().map(|p| p.phase), Some(RunPhase::Loading));
    let last = seen.last().unwrap();
    assert_eq!(last.phase, RunPhase::Done);
    assert_eq!(last.completed, 3);
    assert_eq!(last.total, 3);
    assert_eq!(last.correct, 1);
    assert!(seen.iter().all(|p| p.model == "scripted/model"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_humaneval_runs_completions_in_sandbox() {
    let python_available = std::process::Command::new("python3")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !python_available {
        eprintln!("python3 not found, skipping");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_split(
        &dir,
        "humaneval",
        "test",
        &[
            r#"{"task_id":"HumanEval/0","prompt":"def add(a, b):\n","test":"def check(candidate):\n    assert candidate(2, 3) == 5\n","entry_point":"add"}"#,
            r#"{"task_id":"HumanEval/1","prompt":"def neg(a):\n","test":"def check(candidate):\n    assert candidate(2) == -2\n","entry_point":"neg"}"#,
        ],
    );

    let config = EvaluationConfig::with_benchmarks(["humaneval"]).with_data_dir(dir.path());
    let transport = Arc::new(ScriptedTransport::new(|prompt| {
        if prompt.starts_with("def add") {
            Ok("```python\n    return a + b\n```".to_string())
        } else {
            Ok("    return a".to_string())
        }
    }));

    let results = Orchestrator::new(config)
        .run_with_client(&model(), client(transport))
        .await;

    assert_eq!(results.len(), 1);
    let humaneval = &results[0];
    assert_eq!(humaneval.total_samples, 2);
    assert!(humaneval.samples[0].correct);
    assert!(!humaneval.samples[1].correct);
    assert_eq!(humaneval.samples[1].error.as_deref(), Some("Failed Execution"));
    assert!((humaneval.score - 0.5).abs() < 1e-9);
}
