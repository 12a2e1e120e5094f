//! Report generation for evaluation results
//!
//! Generates reports in Markdown and JSON.

mod json;
mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use llmbench_core::config::ReportFormat;
use llmbench_core::{BenchError, BenchResult};

use crate::metrics::BenchmarkResult;

/// Generate a report in the specified format
pub fn generate_report(
    format: ReportFormat,
    model: &str,
    results: &[BenchmarkResult],
    generated_at: DateTime<Utc>,
) -> BenchResult<String> {
    match format {
        ReportFormat::Markdown => Ok(MarkdownReporter::generate(model, results, generated_at)),
        ReportFormat::Json => JsonReporter::generate(model, results, generated_at),
    }
}

/// Report file name: `report_<model>_<YYYYmmdd_HHMMSS>.<ext>`
///
/// `/` and `:` in the model name become `_`.
pub fn report_file_name(model: &str, generated_at: DateTime<Utc>, format: ReportFormat) -> String {
    let safe_model = model.replace(['/', ':'], "_");
    format!(
        "report_{}_{}.{}",
        safe_model,
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Writes model reports into an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    formats: Vec<ReportFormat>,
}

impl ReportWriter {
    /// Writer producing `formats` under `output_dir`
    pub fn new(output_dir: impl AsRef<Path>, formats: Vec<ReportFormat>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            formats,
        }
    }

    /// Write one file per format; the directory is created if missing.
    ///
    /// Returns the paths written.
    pub fn write(&self, results: &[BenchmarkResult], model_name: &str) -> BenchResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            BenchError::report(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let generated_at = Utc::now();
        let mut written = Vec::with_capacity(self.formats.len());

        for &format in &self.formats {
            let content = generate_report(format, model_name, results, generated_at)?;
            let path = self
                .output_dir
                .join(report_file_name(model_name, generated_at, format));
            fs::write(&path, content).map_err(|e| {
                BenchError::report(format!("cannot write {}: {}", path.display(), e))
            })?;

            tracing::info!(model = model_name, path = %path.display(), "report written");
            written.push(path);
        }

        Ok(written)
    }
}
