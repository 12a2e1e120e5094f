//! Compile-time registry of benchmarks

use std::fmt;

use llmbench_core::{BenchResult, SandboxExecutor};

use super::run::{RunContext, run_benchmark};
use super::{gsm8k, math, mmlu};
use super::{Gsm8kEvaluator, HumanEvalEvaluator, MathEvaluator, MmluEvaluator};
use crate::metrics::BenchmarkResult;

/// Every benchmark this crate can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenchmarkKind {
    Gsm8k,
    Math,
    Mmlu,
    HumanEval,
}

impl BenchmarkKind {
    /// All benchmarks, in display order
    pub fn all() -> &'static [BenchmarkKind] {
        &[
            BenchmarkKind::Gsm8k,
            BenchmarkKind::Math,
            BenchmarkKind::Mmlu,
            BenchmarkKind::HumanEval,
        ]
    }

    /// Resolve a configured name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gsm8k" => Some(BenchmarkKind::Gsm8k),
            "math" => Some(BenchmarkKind::Math),
            "mmlu" => Some(BenchmarkKind::Mmlu),
            "humaneval" => Some(BenchmarkKind::HumanEval),
            _ => None,
        }
    }

    /// Canonical name, also the corpus directory name
    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkKind::Gsm8k => "gsm8k",
            BenchmarkKind::Math => "math",
            BenchmarkKind::Mmlu => "mmlu",
            BenchmarkKind::HumanEval => "humaneval",
        }
    }

    /// One-line description of how the benchmark is scored
    pub fn description(&self) -> &'static str {
        match self {
            BenchmarkKind::Gsm8k => "grade-school math; last number in the response vs `#### n`",
            BenchmarkKind::Math => "competition math; last \\boxed{} answer, spaces and commas ignored",
            BenchmarkKind::Mmlu => "multiple choice; first letter of the response vs the key",
            BenchmarkKind::HumanEval => "code synthesis; pass@1 of unit tests run in the sandbox",
        }
    }

    /// Default number of few-shot examples
    pub fn default_k_shot(&self) -> usize {
        match self {
            BenchmarkKind::Gsm8k => gsm8k::DEFAULT_K_SHOT,
            BenchmarkKind::Math => math::DEFAULT_K_SHOT,
            BenchmarkKind::Mmlu => mmlu::DEFAULT_K_SHOT,
            BenchmarkKind::HumanEval => 0,
        }
    }

    /// Run this benchmark with its evaluator
    pub async fn run(self, ctx: RunContext) -> BenchResult<BenchmarkResult> {
        match self {
            BenchmarkKind::Gsm8k => run_benchmark(&Gsm8kEvaluator, &ctx).await,
            BenchmarkKind::Math => run_benchmark(&MathEvaluator, &ctx).await,
            BenchmarkKind::Mmlu => run_benchmark(&MmluEvaluator, &ctx).await,
            BenchmarkKind::HumanEval => {
                let evaluator = HumanEvalEvaluator::new(
                    SandboxExecutor::new(ctx.sandbox.clone()),
                    ctx.config.sandbox_timeout,
                );
                run_benchmark(&evaluator, &ctx).await
            }
        }
    }
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in BenchmarkKind::all() {
            assert_eq!(BenchmarkKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(BenchmarkKind::from_name("HumanEval"), Some(BenchmarkKind::HumanEval));
        assert_eq!(BenchmarkKind::from_name(" GSM8K "), Some(BenchmarkKind::Gsm8k));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(BenchmarkKind::from_name("arc"), None);
    }
}
