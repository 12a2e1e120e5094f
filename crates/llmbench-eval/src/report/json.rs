//! JSON report generation

use chrono::{DateTime, Utc};
use llmbench_core::BenchResult;
use serde::Serialize;

use crate::metrics::{BenchmarkResult, overall_score};

#[derive(Serialize)]
struct JsonReport<'a> {
    model: &'a str,
    generated_at: DateTime<Utc>,
    overall_score: f64,
    results: &'a [BenchmarkResult],
}

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report including every sample result
    pub fn generate(
        model: &str,
        results: &[BenchmarkResult],
        generated_at: DateTime<Utc>,
    ) -> BenchResult<String> {
        let report = JsonReport {
            model,
            generated_at,
            overall_score: overall_score(results),
            results,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SampleResult;

    #[test]
    fn test_json_generation() {
        let results = vec![BenchmarkResult {
            benchmark: "gsm8k".to_string(),
            model: "test-model".to_string(),
            score: 1.0,
            total_samples: 1,
            correct_samples: 1,
            failed_calls: 0,
            duration_secs: 1.0,
            completed_at: Utc::now(),
            samples: vec![SampleResult::scored(true, "42", "42")],
        }];

        let json = JsonReporter::generate("test-model", &results, Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["model"], "test-model");
        assert_eq!(value["overall_score"], 1.0);
        assert_eq!(value["results"][0]["samples"][0]["parsed_answer"], "42");
    }
}
