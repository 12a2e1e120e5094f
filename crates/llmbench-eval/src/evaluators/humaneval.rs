//! Function synthesis checked by running unit tests in the sandbox

use std::time::Duration;

use async_trait::async_trait;
use llmbench_core::{
    BenchResult, BenchmarkConfig, ChatMessage, ExecutionReason, Prompt, SandboxExecutor,
};
use rand::rngs::StdRng;

use super::{Evaluator, LoadedData};
use crate::corpus::{CorpusLoader, HumanEvalSample};
use crate::metrics::{SampleResult, pass_at_1};

const FENCE: &str = "```";

/// Remove a surrounding markdown code fence, if there is one.
///
/// The info string after the opening fence (```` ```python ````) is
/// dropped too. An unclosed fence keeps everything after it.
pub fn strip_code_fences(response: &str) -> &str {
    let Some(open) = response.find(FENCE) else {
        return response;
    };
    let after_open = &response[open + FENCE.len()..];
    let body_start = after_open.find('\n').map_or(after_open.len(), |i| i + 1);
    let body = &after_open[body_start..];

    match body.find(FENCE) {
        Some(close) => &body[..close],
        None => body,
    }
}

/// Program executed for one sample: prompt, completion, tests, check call
pub fn build_program(sample: &HumanEvalSample, completion: &str) -> String {
    format!(
        "{}{}\n\n{}\n\ncheck({})",
        sample.prompt, completion, sample.test, sample.entry_point
    )
}

fn describe_failure(reason: ExecutionReason) -> String {
    match reason {
        ExecutionReason::None => String::new(),
        ExecutionReason::Timeout => "Timeout".to_string(),
        ExecutionReason::NonZeroExit(Some(code)) => format!("Process exited with code {}", code),
        ExecutionReason::NonZeroExit(None) => "Process killed by signal".to_string(),
        ExecutionReason::RuntimeFailure => "Failed Execution".to_string(),
    }
}

/// Evaluator for HumanEval
pub struct HumanEvalEvaluator {
    sandbox: SandboxExecutor,
    timeout: Duration,
}

impl HumanEvalEvaluator {
    /// Evaluator that runs each program in `sandbox` for at most `timeout`
    pub fn new(sandbox: SandboxExecutor, timeout: Duration) -> Self {
        Self { sandbox, timeout }
    }
}

#[async_trait]
impl Evaluator for HumanEvalEvaluator {
    type Sample = HumanEvalSample;

    fn benchmark_name(&self) -> &'static str {
        "humaneval"
    }

    fn load_data(
        &self,
        loader: &CorpusLoader,
        config: &BenchmarkConfig,
    ) -> BenchResult<LoadedData<HumanEvalSample>> {
        let mut samples: Vec<HumanEvalSample> = loader.load_split(self.benchmark_name(), "test")?;
        if let Some(limit) = config.limit {
            samples.truncate(limit);
        }
        Ok((samples, None))
    }

    fn format_prompt(
        &self,
        sample: &HumanEvalSample,
        _pool: Option<&[HumanEvalSample]>,
        _config: &BenchmarkConfig,
        _rng: &mut StdRng,
    ) -> Prompt {
        vec![ChatMessage::user(sample.prompt.clone())]
    }

    async fn process_response(&self, response: &str, sample: &HumanEvalSample) -> SampleResult {
        let program = build_program(sample, strip_code_fences(response));

        match self.sandbox.execute(&program, self.timeout).await {
            Ok(outcome) if outcome.passed => SampleResult {
                correct: true,
                ..Default::default()
            },
            Ok(outcome) => {
                tracing::debug!(task_id = %sample.task_id, reason = %outcome.reason, "sample failed");
                SampleResult::failed(describe_failure(outcome.reason))
            }
            Err(error) => {
                tracing::warn!(task_id = %sample.task_id, error = %error, "sandbox failure");
                SampleResult::failed(error.to_string())
            }
        }
    }

    fn aggregate(&self, results: &[SampleResult]) -> f64 {
        pass_at_1(results).rate
    }
}
