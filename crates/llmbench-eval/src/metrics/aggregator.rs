//! Score aggregation

use super::types::{BenchmarkResult, PassAtK, SampleResult};

/// Fraction of correct samples; 0.0 for no samples
pub fn accuracy(results: &[SampleResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let correct = results.iter().filter(|r| r.correct).count();
    correct as f64 / results.len() as f64
}

/// pass@1 with one generation per problem
pub fn pass_at_1(results: &[SampleResult]) -> PassAtK {
    let passed = results.iter().filter(|r| r.correct).count();
    PassAtK::new(1, passed, results.len())
}

/// Mean of benchmark scores; 0.0 when nothing ran
pub fn overall_score(results: &[BenchmarkResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(pattern: &[bool]) -> Vec<SampleResult> {
        pattern
            .iter()
            .map(|&correct| SampleResult {
                correct,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_empty_accuracy_is_zero() {
        assert_eq!(accuracy(&[]), 0.0);
    }

    #[test]
    fn test_accuracy_is_k_over_n() {
        let r = results(&[true, false, true, true]);
        assert!((accuracy(&r) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_pass_at_1_matches_accuracy() {
        let r = results(&[true, false, false]);
        let metric = pass_at_1(&r);
        assert_eq!(metric.passed, 1);
        assert_eq!(metric.total, 3);
        assert!((metric.rate - accuracy(&r)).abs() < 1e-12);
    }

    #[test]
    fn test_overall_score_is_mean() {
        let make = |score| BenchmarkResult {
            benchmark: "b".into(),
            model: "m".into(),
            score,
            total_samples: 0,
            correct_samples: 0,
            failed_calls: 0,
            duration_secs: 0.0,
            completed_at: chrono::Utc::now(),
            samples: Vec::new(),
        };
        let overall = overall_score(&[make(0.5), make(1.0)]);
        assert!((overall - 0.75).abs() < 1e-12);
        assert_eq!(overall_score(&[]), 0.0);
    }
}
