//! Error types for llmbench

use thiserror::Error;

/// Result type alias for llmbench operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Main error type for benchmark runs
///
/// Sample-level failures (API errors, unparsable answers, sandbox failures)
/// never become a `BenchError`; they are folded into the sample's result.
/// What remains here aborts either a single benchmark (`CorpusLoad`) or the
/// whole process before any evaluation starts (`Config`).
#[derive(Error, Debug, Clone)]
pub enum BenchError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The corpus for one benchmark is missing or malformed
    #[error("Failed to load corpus for '{benchmark}': {message}")]
    CorpusLoad { benchmark: String, message: String },

    /// A benchmark name that no evaluator is registered for
    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Report rendering or writing errors
    #[error("Report error: {0}")]
    Report(String),
}

impl BenchError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new corpus load error scoped to one benchmark
    pub fn corpus(benchmark: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorpusLoad {
            benchmark: benchmark.into(),
            message: message.into(),
        }
    }

    /// Create a new report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report(message.into())
    }

    /// Whether this error only invalidates a single benchmark
    pub fn is_benchmark_scoped(&self) -> bool {
        matches!(self, Self::CorpusLoad { .. } | Self::UnknownBenchmark(_))
    }
}

impl From<std::io::Error> for BenchError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<reqwest::Error> for BenchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_error_display() {
        let err = BenchError::corpus("gsm8k", "missing test.jsonl");
        assert_eq!(
            err.to_string(),
            "Failed to load corpus for 'gsm8k': missing test.jsonl"
        );
        assert!(err.is_benchmark_scoped());
    }

    #[test]
    fn test_config_error_is_not_benchmark_scoped() {
        let err = BenchError::config("no models configured");
        assert!(!err.is_benchmark_scoped());
        assert!(err.to_string().contains("no models configured"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BenchError = io.into();
        assert!(matches!(err, BenchError::Io(_)));
    }
}
