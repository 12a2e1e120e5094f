//! Accumulates sample results during a benchmark run

use std::time::Instant;

use chrono::Utc;

use super::types::{BenchmarkResult, SampleResult};

/// Collects results in corpus order while a benchmark runs
pub struct SampleCollector {
    results: Vec<SampleResult>,
    correct: usize,
    failed_calls: usize,
    start_time: Instant,
}

impl SampleCollector {
    /// Start collecting; the run's clock starts now
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            correct: 0,
            failed_calls: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a scored sample
    pub fn record(&mut self, result: SampleResult) {
        if result.correct {
            self.correct += 1;
        }
        self.results.push(result);
    }

    /// Record a sample whose API call failed
    pub fn record_api_failure(&mut self) {
        self.failed_calls += 1;
        self.results.push(SampleResult::api_failure());
    }

    /// Results collected so far
    pub fn results(&self) -> &[SampleResult] {
        &self.results
    }

    /// Samples judged correct so far
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    /// API calls that failed so far
    pub fn failed_calls(&self) -> usize {
        self.failed_calls
    }

    /// Close the run with its aggregate score
    pub fn finish(self, benchmark: &str, model: &str, score: f64) -> BenchmarkResult {
        BenchmarkResult {
            benchmark: benchmark.to_string(),
            model: model.to_string(),
            score,
            total_samples: self.results.len(),
            correct_samples: self.correct,
            failed_calls: self.failed_calls,
            duration_secs: self.start_time.elapsed().as_secs_f64(),
            completed_at: Utc::now(),
            samples: self.results,
        }
    }
}

impl Default for SampleCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_counts() {
        let mut collector = SampleCollector::new();
        collector.record(SampleResult::scored(true, "1", "1"));
        collector.record_api_failure();
        collector.record(SampleResult::scored(false, "2", "3"));

        assert_eq!(collector.correct_count(), 1);
        assert_eq!(collector.failed_calls(), 1);

        let result = collector.finish("gsm8k", "model-a", 1.0 / 3.0);
        assert_eq!(result.total_samples, 3);
        assert_eq!(result.correct_samples, 1);
        assert_eq!(result.failed_calls, 1);
        assert!(result.samples[1].is_api_failure());
        assert_eq!(result.samples[2].parsed_answer.as_deref(), Some("2"));
    }

    #[test]
    fn test_correct_count_tracks_each_record() {
        let mut collector = SampleCollector::new();
        let answers = [true, false, true, true, false];
        for (i, correct) in answers.iter().enumerate() {
            collector.record(SampleResult::scored(*correct, "x", "x"));
            let expected = answers[..=i].iter().filter(|c| **c).count();
            assert_eq!(collector.correct_count(), expected);
        }
        collector.record_api_failure();
        assert_eq!(collector.correct_count(), 3);
        assert_eq!(collector.finish("math", "m", 0.5).correct_samples, 3);
    }

    #[test]
    fn test_empty_run() {
        let result = SampleCollector::default().finish("mmlu", "m", 0.0);
        assert_eq!(result.total_samples, 0);
        assert!(result.samples.is_empty());
    }
}
