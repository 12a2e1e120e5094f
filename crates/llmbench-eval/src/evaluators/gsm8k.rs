//! Grade-school math with numeric answers

use std::fmt::Write as _;
use std::sync::LazyLock;

use async_trait::async_trait;
use llmbench_core::{BenchResult, BenchmarkConfig, ChatMessage, Prompt};
use rand::rngs::StdRng;
use regex::Regex;

use super::few_shot::sample_few_shot;
use super::{Evaluator, LoadedData};
use crate::corpus::{CorpusLoader, Gsm8kSample};
use crate::metrics::SampleResult;

pub(super) const DEFAULT_K_SHOT: usize = 8;
const TOLERANCE: f64 = 1e-6;

static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,.]+").unwrap());

/// Ground truth: the text after the last `####`, commas stripped
pub fn parse_ground_truth(answer: &str) -> Option<f64> {
    let tail = answer.rsplit("####").next()?;
    tail.trim().replace(',', "").parse().ok()
}

/// The last number-like token in `text`, cleaned for parsing.
///
/// Tokens without a digit (a lone `.` or `,`) are ignored and trailing
/// sentence punctuation is dropped, so `"the answer is 42."` gives `"42"`.
pub fn extract_last_number(text: &str) -> Option<String> {
    NUMBER_TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| token.chars().any(|c| c.is_ascii_digit()))
        .last()
        .map(|token| token.trim_end_matches(['.', ',']).replace(',', ""))
}

/// Evaluator for GSM8K
pub struct Gsm8kEvaluator;

#[async_trait]
impl Evaluator for Gsm8kEvaluator {
    type Sample = Gsm8kSample;

    fn benchmark_name(&self) -> &'static str {
        "gsm8k"
    }

    fn load_data(
        &self,
        loader: &CorpusLoader,
        config: &BenchmarkConfig,
    ) -> BenchResult<LoadedData<Gsm8kSample>> {
        let mut samples: Vec<Gsm8kSample> = loader.load_split(self.benchmark_name(), "test")?;
        if let Some(limit) = config.limit {
            samples.truncate(limit);
        }

        let pool = if config.k_shot_or(DEFAULT_K_SHOT) > 0 {
            Some(loader.load_split(self.benchmark_name(), "train")?)
        } else {
            None
        };

        Ok((samples, pool))
    }

    fn format_prompt(
        &self,
        sample: &Gsm8kSample,
        pool: Option<&[Gsm8kSample]>,
        config: &BenchmarkConfig,
        rng: &mut StdRng,
    ) -> Prompt {
        let mut prompt = String::from(
            "The following are grade school math questions. Please solve them step-by-step.\n\n",
        );

        for example in sample_few_shot(pool, config.k_shot_or(DEFAULT_K_SHOT), rng) {
            let _ = write!(
                prompt,
                "Question: {}\nAnswer:\n{}\n\n",
                example.question, example.answer
            );
        }

        let _ = write!(prompt, "Question: {}\nAnswer:\n", sample.question);
        vec![ChatMessage::user(prompt)]
    }

    async fn process_response(&self, response: &str, sample: &Gsm8kSample) -> SampleResult {
        let Some(expected) = parse_ground_truth(&sample.answer) else {
            return SampleResult::failed("Could not parse ground truth answer.");
        };

        let Some(token) = extract_last_number(response) else {
            return SampleResult::scored(false, "N/A", expected.to_string())
                .with_error("No number found in response");
        };

        match token.parse::<f64>() {
            Ok(value) => SampleResult::scored(
                (value - expected).abs() < TOLERANCE,
                token,
                expected.to_string(),
            ),
            Err(_) => SampleResult::scored(false, token.clone(), expected.to_string())
                .with_error(format!("Could not parse model answer '{}'", token)),
        }
    }
}
