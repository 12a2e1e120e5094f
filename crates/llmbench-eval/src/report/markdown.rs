//! Markdown report generation

use chrono::{DateTime, Utc};

use crate::metrics::{BenchmarkResult, overall_score};

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(model: &str, results: &[BenchmarkResult], generated_at: DateTime<Utc>) -> String {
        let mut md = String::new();

        md.push_str("# LLM Benchmark Report\n\n");
        md.push_str(&format!("- **Model**: {}\n", model));
        md.push_str(&format!(
            "- **Timestamp**: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "- **Overall Score**: {:.2}%\n\n",
            overall_score(results) * 100.0
        ));

        md.push_str("## Results\n\n");
        md.push_str("| Benchmark | Score | Samples | Correct | Failed Calls | Duration |\n");
        md.push_str("|-----------|-------|---------|---------|--------------|----------|\n");

        for result in results {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {:.1}s |\n",
                result.benchmark,
                result.score_percentage(),
                result.total_samples,
                result.correct_samples,
                result.failed_calls,
                result.duration_secs
            ));
        }
        md.push('\n');

        md
    }
}
