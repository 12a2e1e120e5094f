//! `llmbench validate`

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use llmbench_core::config::load_config;
use llmbench_core::EvaluationConfig;
use llmbench_eval::{BenchmarkKind, CorpusLoader};

use crate::console;

/// Load a config file and print what a run would use
pub fn validate(path: &Path) -> Result<()> {
    let config =
        load_config(path).with_context(|| format!("cannot load {}", path.display()))?;
    console::success(&format!("{} is valid", path.display()));

    console::header("Models");
    for model in &config.models {
        println!(
            "  {} ({}) at {} key {} timeout {:?}",
            model.name.bold(),
            model.model_name,
            model.api_base,
            model.redacted_key(),
            model.request_timeout
        );
    }

    let evaluation = &config.evaluation;
    let loader = CorpusLoader::new(&evaluation.data_dir);

    console::header("Benchmarks");
    for name in &evaluation.benchmarks {
        let Some(kind) = BenchmarkKind::from_name(name) else {
            console::warn(&format!("unknown benchmark '{}' will be skipped", name));
            continue;
        };

        let settings = evaluation.benchmark_config(kind.name());
        println!(
            "  {:<10} k_shot={} max_tokens={} temperature={} limit={} seed={}",
            kind.name(),
            settings.k_shot_or(kind.default_k_shot()),
            settings.max_tokens,
            settings.temperature,
            settings
                .limit
                .map_or_else(|| "default".to_string(), |l| l.to_string()),
            settings
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string()),
        );
        if kind == BenchmarkKind::HumanEval {
            println!(
                "  {:<10} sandbox={:?} timeout={:?}",
                "",
                evaluation.sandbox.runtime,
                settings.sandbox_timeout
            );
        }
        if !loader.has_split(kind.name(), "test") {
            console::warn(&format!(
                "no corpus at {}",
                loader.split_path(kind.name(), "test").display()
            ));
        }
    }

    for key in unmatched_settings(evaluation) {
        console::warn(&format!(
            "benchmark_settings entry '{}' matches no known benchmark and is ignored",
            key
        ));
    }

    console::header("Output");
    println!("  data dir:   {}", evaluation.data_dir.display());
    println!("  output dir: {}", evaluation.output_dir.display());
    println!("  formats:    {:?}", evaluation.report_formats);
    Ok(())
}

/// Settings keys that no benchmark will ever look up
fn unmatched_settings(evaluation: &EvaluationConfig) -> Vec<&str> {
    let mut keys: Vec<&str> = evaluation
        .benchmark_settings
        .keys()
        .map(String::as_str)
        .filter(|key| BenchmarkKind::from_name(key).is_none())
        .collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "models:\n  - name: m\n    api_key: k\n    api_base: http://localhost/v1\n    model_name: m\nevaluation:\n  benchmarks: [gsm8k, nope]\n",
        )
        .unwrap();
        assert!(validate(&path).is_ok());
    }

    #[test]
    fn test_unmatched_settings_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "models:\n  - name: m\n    api_key: k\n    api_base: http://localhost/v1\n    model_name: m\nevaluation:\n  benchmarks: [GSM8K]\n  benchmark_settings:\n    GSM8K:\n      k_shot: 0\n    gsm-8k:\n      k_shot: 2\n",
        )
        .unwrap();
        assert!(validate(&path).is_ok());

        let config = load_config(&path).unwrap();
        assert_eq!(unmatched_settings(&config.evaluation), vec!["gsm-8k"]);
    }

    #[test]
    fn test_config_without_models_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "evaluation:\n  benchmarks: [gsm8k]\n").unwrap();
        assert!(validate(&path).is_err());
    }
}
