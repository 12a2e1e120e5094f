//! Multiple-choice knowledge questions

use async_trait::async_trait;
use llmbench_core::{BenchResult, BenchmarkConfig, ChatMessage, Prompt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use super::few_shot::sample_few_shot;
use super::{Evaluator, LoadedData};
use crate::corpus::{CorpusLoader, MmluSample};
use crate::metrics::SampleResult;

pub(super) const DEFAULT_K_SHOT: usize = 5;
const DEFAULT_LIMIT: usize = 200;

/// Letter for a choice index: 0 → `A`
pub fn answer_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

/// The model's choice: first alphabetic character of the trimmed response
pub fn extract_choice(response: &str) -> Option<char> {
    response
        .trim()
        .chars()
        .find(|c| c.is_alphabetic())
        .and_then(|c| c.to_uppercase().next())
}

fn format_question(sample: &MmluSample, with_answer: bool) -> String {
    let mut text = format!("{}\n", sample.question);
    for (i, choice) in sample.choices.iter().enumerate() {
        if let Some(letter) = answer_letter(i) {
            text.push_str(&format!("{}. {}\n", letter, choice));
        }
    }
    text.push_str("Answer:");
    if with_answer {
        if let Some(letter) = answer_letter(sample.answer) {
            text.push_str(&format!(" {}\n\n", letter));
        }
    }
    text
}

/// Evaluator for MMLU
pub struct MmluEvaluator;

#[async_trait]
impl Evaluator for MmluEvaluator {
    type Sample = MmluSample;

    fn benchmark_name(&self) -> &'static str {
        "mmlu"
    }

    fn load_data(
        &self,
        loader: &CorpusLoader,
        config: &BenchmarkConfig,
    ) -> BenchResult<LoadedData<MmluSample>> {
        let test: Vec<MmluSample> = loader.load_split(self.benchmark_name(), "test")?;
        let amount = config.limit.unwrap_or(DEFAULT_LIMIT).min(test.len());

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Keep the subset in corpus order
        let mut picked = index::sample(&mut rng, test.len(), amount).into_vec();
        picked.sort_unstable();

        let mut test: Vec<Option<MmluSample>> = test.into_iter().map(Some).collect();
        let samples = picked.into_iter().filter_map(|i| test[i].take()).collect();

        let pool = if config.k_shot_or(DEFAULT_K_SHOT) > 0 {
            Some(loader.load_split(self.benchmark_name(), "auxiliary_train")?)
        } else {
            None
        };

        Ok((samples, pool))
    }

    fn format_prompt(
        &self,
        sample: &MmluSample,
        pool: Option<&[MmluSample]>,
        config: &BenchmarkConfig,
        rng: &mut StdRng,
    ) -> Prompt {
        let mut prompt = String::from("The following are multiple choice questions (with answers).\n\n");

        for example in sample_few_shot(pool, config.k_shot_or(DEFAULT_K_SHOT), rng) {
            prompt.push_str(&format_question(example, true));
        }

        prompt.push_str(&format_question(sample, false));
        vec![ChatMessage::user(prompt)]
    }

    async fn process_response(&self, response: &str, sample: &MmluSample) -> SampleResult {
        let expected = match answer_letter(sample.answer) {
            Some(letter) if sample.answer < sample.choices.len() => letter,
            _ => {
                return SampleResult::failed(format!(
                    "Answer index {} is out of range for {} choices",
                    sample.answer,
                    sample.choices.len()
                ));
            }
        };

        match extract_choice(response) {
            Some(choice) => SampleResult::scored(
                choice == expected,
                choice.to_string(),
                expected.to_string(),
            ),
            None => SampleResult::scored(false, "N/A", expected.to_string())
                .with_error("No letter found in response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(answer: usize) -> MmluSample {
        MmluSample {
            question: "Which is largest?".to_string(),
            choices: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            answer,
            subject: Some("arithmetic".into()),
        }
    }

    #[test]
    fn test_answer_letters() {
        assert_eq!(answer_letter(0), Some('A'));
        assert_eq!(answer_letter(2), Some('C'));
        assert_eq!(answer_letter(25), Some('Z'));
        assert_eq!(answer_letter(26), None);
    }

    #[test]
    fn test_extract_choice() {
        assert_eq!(extract_choice("  c) because..."), Some('C'));
        assert_eq!(extract_choice("(B)"), Some('B'));
        assert_eq!(extract_choice("  "), None);
    }

    #[tokio::test]
    async fn test_verbose_correct_answer() {
        let result = MmluEvaluator
            .process_response("C) because 3 is the largest", &sample(2))
            .await;
        assert!(result.correct);
        assert_eq!(result.parsed_answer.as_deref(), Some("C"));
        assert_eq!(result.correct_answer.as_deref(), Some("C"));
    }

    #[tokio::test]
    async fn test_wrong_choice() {
        let result = MmluEvaluator.process_response("A", &sample(3)).await;
        assert!(!result.correct);
        assert_eq!(result.correct_answer.as_deref(), Some("D"));
    }

    #[tokio::test]
    async fn test_no_letter_in_response() {
        let result = MmluEvaluator.process_response("  ", &sample(1)).await;
        assert!(!result.correct);
        assert_eq!(result.parsed_answer.as_deref(), Some("N/A"));
        assert_eq!(result.error.as_deref(), Some("No letter found in response"));
    }

    #[tokio::test]
    async fn test_index_out_of_range() {
        let result = MmluEvaluator.process_response("A", &sample(7)).await;
        assert!(!result.correct);
        assert!(result.error.unwrap().contains("out of range"));
    }

    #[test]
    fn test_prompt_layout() {
        let config = BenchmarkConfig::default().with_k_shot(0);
        let prompt = MmluEvaluator.format_prompt(
            &sample(0),
            None,
            &config,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(
            prompt[0].content,
            "The following are multiple choice questions (with answers).\n\n\
             Which is largest?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer:"
        );
    }

    #[test]
    fn test_example_includes_answer() {
        assert!(format_question(&sample(1), true).ends_with("Answer: B\n\n"));
    }
}
