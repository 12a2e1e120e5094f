//! File-based configuration loading

use std::fs;
use std::path::Path;

use super::Config;
use crate::error::{BenchError, BenchResult};

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; anything unknown is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load, expand and validate the configuration file.
///
/// Unlike most lookups in the runner, a missing or unreadable file is fatal:
/// nothing can be evaluated without models.
pub fn load_config(path: impl AsRef<Path>) -> BenchResult<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BenchError::config(format!(
            "Configuration file not found at '{}'",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        BenchError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&content, ConfigFormat::from_path(path))
        .map_err(|e| BenchError::config(format!("{} ({})", e, path.display())))
}

/// Parse, expand and validate configuration text
pub fn load_config_from_str(content: &str, format: ConfigFormat) -> BenchResult<Config> {
    let mut config: Config = match format {
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| BenchError::config(format!("Failed to parse TOML config: {}", e)))?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| BenchError::config(format!("Failed to parse YAML config: {}", e)))?,
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| BenchError::config(format!("Failed to parse JSON config: {}", e)))?,
    };

    for model in &mut config.models {
        model.expand_env()?;
    }
    config.evaluation.normalize_settings()?;

    config.validate()?;
    tracing::debug!(
        models = config.models.len(),
        benchmarks = config.evaluation.benchmarks.len(),
        "configuration loaded"
    );
    Ok(config)
}
