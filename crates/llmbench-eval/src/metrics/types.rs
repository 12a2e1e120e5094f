//! Core result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error recorded for a sample whose API call failed
pub const API_CALL_FAILED: &str = "API call failed";

/// Outcome of scoring one sample
///
/// Every sample yields one of these, including samples whose call or
/// parsing failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Whether the model's answer was judged correct
    pub correct: bool,

    /// Answer extracted from the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_answer: Option<String>,

    /// Expected answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,

    /// Diagnostic for failed calls, parses or executions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Raw model response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl SampleResult {
    /// A scored sample
    pub fn scored(
        correct: bool,
        parsed_answer: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            correct,
            parsed_answer: Some(parsed_answer.into()),
            correct_answer: Some(correct_answer.into()),
            ..Default::default()
        }
    }

    /// An incorrect sample with a diagnostic
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// A sample whose API call did not produce a response
    pub fn api_failure() -> Self {
        Self::failed(API_CALL_FAILED)
    }

    /// Attach the expected answer
    pub fn with_correct_answer(mut self, answer: impl Into<String>) -> Self {
        self.correct_answer = Some(answer.into());
        self
    }

    /// Attach a diagnostic
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach the raw response
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Whether this sample failed at the API layer
    pub fn is_api_failure(&self) -> bool {
        self.error.as_deref() == Some(API_CALL_FAILED)
    }
}

/// Summary of one benchmark run for one model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name
    pub benchmark: String,

    /// Model display name
    pub model: String,

    /// Aggregate score in `[0, 1]`
    pub score: f64,

    /// Number of samples evaluated
    pub total_samples: usize,

    /// Number of samples judged correct
    pub correct_samples: usize,

    /// Samples whose API call failed
    pub failed_calls: usize,

    /// Wall-clock time for the run
    pub duration_secs: f64,

    /// When the run finished
    pub completed_at: DateTime<Utc>,

    /// Per-sample results in corpus order
    pub samples: Vec<SampleResult>,
}

impl BenchmarkResult {
    /// Score as a percentage string
    pub fn score_percentage(&self) -> String {
        format!("{:.2}%", self.score * 100.0)
    }
}

/// Pass@K metric - probability of passing within K attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassAtK {
    /// K value (number of attempts)
    pub k: u32,

    /// Number of problems that passed within K attempts
    pub passed: usize,

    /// Total number of problems
    pub total: usize,

    /// Pass rate (passed / total)
    pub rate: f64,
}

impl PassAtK {
    /// Create a new Pass@K metric
    pub fn new(k: u32, passed: usize, total: usize) -> Self {
        let rate = if total > 0 {
            passed as f64 / total as f64
        } else {
            0.0
        };

        Self {
            k,
            passed,
            total,
            rate,
        }
    }

    /// Format as percentage string
    pub fn as_percentage(&self) -> String {
        format!("{:.1}%", self.rate * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_at_k_empty_is_zero() {
        let metric = PassAtK::new(1, 0, 0);
        assert_eq!(metric.rate, 0.0);
    }

    #[test]
    fn test_pass_at_k_percentage() {
        let metric = PassAtK::new(1, 1, 4);
        assert_eq!(metric.as_percentage(), "25.0%");
    }

    #[test]
    fn test_api_failure_marker() {
        let result = SampleResult::api_failure();
        assert!(!result.correct);
        assert!(result.is_api_failure());
        assert_eq!(result.error.as_deref(), Some("API call failed"));
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let json = serde_json::to_value(SampleResult::scored(true, "42", "42")).unwrap();
        assert_eq!(json["correct"], true);
        assert!(json.get("error").is_none());
    }
}
