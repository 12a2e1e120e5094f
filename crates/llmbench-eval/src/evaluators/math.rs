//! Competition math with `\boxed{}` answers

use std::fmt::Write as _;

use async_trait::async_trait;
use llmbench_core::{BenchResult, BenchmarkConfig, ChatMessage, Prompt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::few_shot::sample_few_shot;
use super::{Evaluator, LoadedData};
use crate::corpus::{CorpusLoader, MathSample};
use crate::metrics::SampleResult;

pub(super) const DEFAULT_K_SHOT: usize = 4;
const DEFAULT_LIMIT: usize = 500;
/// The corpus ships one split; a fixed shuffle carves the scored set out of it
const SPLIT_SEED: u64 = 42;

const BOXED: &str = "\\boxed{";

/// Content of the last `\boxed{...}`, honoring nested braces
pub fn last_boxed(text: &str) -> Option<&str> {
    let start = text.rfind(BOXED)? + BOXED.len();
    let mut depth = 1usize;

    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Drop whitespace and commas before comparing answers
pub fn normalize_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

/// Evaluator for the MATH benchmark
pub struct MathEvaluator;

#[async_trait]
impl Evaluator for MathEvaluator {
    type Sample = MathSample;

    fn benchmark_name(&self) -> &'static str {
        "math"
    }

    fn load_data(
        &self,
        loader: &CorpusLoader,
        config: &BenchmarkConfig,
    ) -> BenchResult<LoadedData<MathSample>> {
        let mut all: Vec<MathSample> = loader.load_split(self.benchmark_name(), "train")?;
        all.shuffle(&mut StdRng::seed_from_u64(SPLIT_SEED));

        let test_size = config.limit.unwrap_or(DEFAULT_LIMIT).min(all.len());
        let pool = all.split_off(test_size);
        Ok((all, Some(pool)))
    }

    fn format_prompt(
        &self,
        sample: &MathSample,
        pool: Option<&[MathSample]>,
        config: &BenchmarkConfig,
        rng: &mut StdRng,
    ) -> Prompt {
        let mut prompt = String::from(
            "The following are challenging math problems. Please solve them step-by-step, \
             and put the final answer in a box like \\boxed{answer}.\n\n",
        );

        for example in sample_few_shot(pool, config.k_shot_or(DEFAULT_K_SHOT), rng) {
            let _ = write!(
                prompt,
                "Problem: {}\nSolution:\n{}\n\n",
                example.problem, example.solution
            );
        }

        let _ = write!(prompt, "Problem: {}\nSolution:\n", sample.problem);
        vec![ChatMessage::user(prompt)]
    }

    async fn process_response(&self, response: &str, sample: &MathSample) -> SampleResult {
        let Some(expected) = last_boxed(&sample.solution) else {
            return SampleResult::failed("Could not parse ground truth answer.");
        };

        match last_boxed(response) {
            Some(answer) => SampleResult::scored(
                normalize_answer(answer) == normalize_answer(expected),
                answer,
                expected,
            ),
            None => SampleResult::scored(false, "N/A", expected)
                .with_error("No \\boxed{} answer found in response"),
        }
    }
}
