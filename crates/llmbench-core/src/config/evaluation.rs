//! Evaluation run configuration
//!
//! Holds the benchmark list, the request parameters shared by all
//! benchmarks, and per-benchmark overrides. Evaluators only ever see the
//! resolved [`BenchmarkConfig`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{BenchError, BenchResult};
use crate::sandbox::SandboxConfig;

/// Configuration for an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Benchmark names to run, in configured order
    #[serde(default)]
    pub benchmarks: Vec<String>,

    /// Request parameters shared by every benchmark
    #[serde(default)]
    pub api_params: ApiParams,

    /// Per-benchmark overrides keyed by benchmark name
    #[serde(default)]
    pub benchmark_settings: HashMap<String, BenchmarkOverrides>,

    /// Root directory of the benchmark corpora
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory that reports are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Report formats to produce for each model
    #[serde(default = "default_report_formats")]
    pub report_formats: Vec<ReportFormat>,

    /// Sandbox used by code-execution benchmarks
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_report_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Markdown]
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            benchmarks: Vec::new(),
            api_params: ApiParams::default(),
            benchmark_settings: HashMap::new(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            report_formats: default_report_formats(),
            sandbox: SandboxConfig::default(),
        }
    }
}

impl EvaluationConfig {
    /// Create a config that runs the given benchmarks
    pub fn with_benchmarks<I, S>(benchmarks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            benchmarks: benchmarks.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the corpus directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the report directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Add or replace the overrides for one benchmark
    pub fn with_override(mut self, benchmark: impl Into<String>, overrides: BenchmarkOverrides) -> Self {
        self.benchmark_settings.insert(benchmark.into(), overrides);
        self
    }

    /// Resolve the settings a benchmark runs with
    pub fn benchmark_config(&self, benchmark: &str) -> BenchmarkConfig {
        let overrides = self
            .benchmark_settings
            .get(&settings_key(benchmark))
            .cloned()
            .unwrap_or_default();

        BenchmarkConfig {
            k_shot: overrides.k_shot,
            max_tokens: overrides.max_tokens.unwrap_or(self.api_params.max_tokens),
            temperature: overrides.temperature.unwrap_or(self.api_params.temperature),
            limit: overrides.limit,
            seed: overrides.seed,
            sandbox_timeout: overrides
                .sandbox_timeout
                .unwrap_or_else(default_sandbox_timeout),
        }
    }

    /// Rewrite `benchmark_settings` keys into their lookup form.
    ///
    /// Two keys that collapse onto the same benchmark are a config error.
    pub(crate) fn normalize_settings(&mut self) -> BenchResult<()> {
        let mut normalized = HashMap::with_capacity(self.benchmark_settings.len());
        for (name, overrides) in self.benchmark_settings.drain() {
            let key = settings_key(&name);
            if normalized.insert(key.clone(), overrides).is_some() {
                return Err(BenchError::config(format!(
                    "benchmark_settings has more than one entry for '{}'",
                    key
                )));
            }
        }
        self.benchmark_settings = normalized;
        Ok(())
    }

    pub(crate) fn validate(&self) -> BenchResult<()> {
        check_temperature("api_params", self.api_params.temperature)?;
        for (name, overrides) in &self.benchmark_settings {
            if let Some(temperature) = overrides.temperature {
                check_temperature(name, temperature)?;
            }
            if overrides.sandbox_timeout.is_some_and(|t| t.is_zero()) {
                return Err(BenchError::config(format!(
                    "Benchmark '{}' has a zero sandbox_timeout",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Benchmark names match trimmed and case-insensitively
fn settings_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn check_temperature(scope: &str, temperature: f32) -> BenchResult<()> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(BenchError::config(format!(
            "{}: temperature {} is outside [0, 2]",
            scope, temperature
        )));
    }
    Ok(())
}

/// Request parameters shared by all benchmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiParams {
    /// Maximum tokens to generate per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.1
}

impl Default for ApiParams {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Optional per-benchmark settings as written in the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkOverrides {
    /// Number of few-shot examples
    #[serde(default)]
    pub k_shot: Option<usize>,

    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum number of scored samples
    #[serde(default)]
    pub limit: Option<usize>,

    /// Seed for few-shot and subset sampling
    #[serde(default)]
    pub seed: Option<u64>,

    /// Deadline for one sandboxed execution
    #[serde(default, with = "humantime_serde")]
    pub sandbox_timeout: Option<Duration>,
}

fn default_sandbox_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Resolved, read-only settings for one benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Few-shot count; `None` means the benchmark's own default
    pub k_shot: Option<usize>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum number of scored samples; `None` means the benchmark's default
    pub limit: Option<usize>,

    /// Seed for few-shot and subset sampling; `None` draws from entropy
    pub seed: Option<u64>,

    /// Deadline for one sandboxed execution
    pub sandbox_timeout: Duration,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        EvaluationConfig::default().benchmark_config("")
    }
}

impl BenchmarkConfig {
    /// Few-shot count, falling back to the benchmark's default
    pub fn k_shot_or(&self, default: usize) -> usize {
        self.k_shot.unwrap_or(default)
    }

    /// Set the few-shot count
    pub fn with_k_shot(mut self, k: usize) -> Self {
        self.k_shot = Some(k);
        self
    }

    /// Set the sample limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sampling seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the sandbox timeout
    pub fn with_sandbox_timeout(mut self, timeout: Duration) -> Self {
        self.sandbox_timeout = timeout;
        self
    }
}

/// Output format of a model report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}
