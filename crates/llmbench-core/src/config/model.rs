//! Model endpoint configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::EvaluationConfig;
use crate::error::{BenchError, BenchResult};

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Models to evaluate, in order
    #[serde(default)]
    pub models: Vec<ModelConfig>,

    /// Evaluation settings shared by every model
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl Config {
    /// Validate the configuration before any evaluation starts
    pub fn validate(&self) -> BenchResult<()> {
        if self.models.is_empty() {
            return Err(BenchError::config("No models found in the configuration"));
        }

        for model in &self.models {
            model.validate()?;
        }

        self.evaluation.validate()
    }

    /// Find a model by its display name
    pub fn model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.iter().find(|m| m.name == name)
    }
}

/// Connection settings for one model under evaluation
#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Display name used in logs and reports
    pub name: String,

    /// API key; `${VAR}` references are expanded at load time
    pub api_key: String,

    /// Base URL of an OpenAI-compatible endpoint, e.g. `https://api.openai.com/v1`
    pub api_base: String,

    /// Model identifier sent in each request
    pub model_name: String,

    /// Deadline for a single HTTP attempt
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(120)
}

impl ModelConfig {
    /// Create a new model config
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
            api_base: api_base.into(),
            model_name: model_name.into(),
            request_timeout: default_request_timeout(),
        }
    }

    /// Set the per-attempt request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Chat completions endpoint for this model
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    /// Expand `${VAR}` references in the API key
    pub(crate) fn expand_env(&mut self) -> BenchResult<()> {
        let expanded = shellexpand::env(&self.api_key).map_err(|e| {
            BenchError::config(format!(
                "Model '{}': cannot expand api_key: {}",
                self.name, e
            ))
        })?;
        self.api_key = expanded.into_owned();
        Ok(())
    }

    fn validate(&self) -> BenchResult<()> {
        if self.name.trim().is_empty() {
            return Err(BenchError::config("Model entry is missing a name"));
        }
        if self.model_name.trim().is_empty() {
            return Err(BenchError::config(format!(
                "Model '{}' is missing model_name",
                self.name
            )));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(BenchError::config(format!(
                "Model '{}' has an invalid api_base: '{}'",
                self.name, self.api_base
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(BenchError::config(format!(
                "Model '{}' has a zero request_timeout",
                self.name
            )));
        }
        Ok(())
    }

    /// Key with everything but the last four characters masked
    pub fn redacted_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("name", &self.name)
            .field("api_key", &self.redacted_key())
            .field("api_base", &self.api_base)
            .field("model_name", &self.model_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelConfig {
        ModelConfig::new("gpt", "sk-test-abcdef", "https://api.example.com/v1/", "gpt-4o-mini")
    }

    #[test]
    fn test_completions_url_trims_slash() {
        assert_eq!(
            model().completions_url(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", model());
        assert!(!debug.contains("sk-test-abcdef"));
        assert!(debug.contains("****cdef"));
    }

    #[test]
    fn test_short_key_fully_masked() {
        let mut m = model();
        m.api_key = "abc".into();
        assert_eq!(m.redacted_key(), "****");
    }

    #[test]
    fn test_validate_rejects_bad_base() {
        let mut m = model();
        m.api_base = "api.example.com".into();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_config_without_models_is_invalid() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("No models"));
    }

    #[test]
    fn test_expand_env_keeps_literal_keys() {
        let mut m = model();
        m.expand_env().unwrap();
        assert_eq!(m.api_key, "sk-test-abcdef");
    }

    #[test]
    fn test_expand_env_reports_missing_variable() {
        let mut m = model();
        m.api_key = "${LLMBENCH_SURELY_UNSET_VARIABLE_0xdead}".into();
        let err = m.expand_env().unwrap_err();
        assert!(err.to_string().contains("gpt"));
    }
}
