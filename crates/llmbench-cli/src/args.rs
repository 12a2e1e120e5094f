//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use llmbench_core::config::ReportFormat;
use std::path::PathBuf;

/// Default configuration file used by every command
pub const DEFAULT_CONFIG_FILE: &str = "configs/config.yaml";

#[derive(Parser, Debug)]
#[command(name = "llmbench")]
#[command(about = "Benchmark chat-completion models on GSM8K, MATH, MMLU and HumanEval")]
#[command(version)]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every configured model
    Run {
        /// Path to configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Benchmarks to run instead of the configured list (comma separated)
        #[arg(long, value_delimiter = ',')]
        benchmarks: Option<Vec<String>>,

        /// Corpus directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Report directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Report formats (comma separated: markdown, json)
        #[arg(long, value_delimiter = ',', value_parser = parse_report_format)]
        format: Option<Vec<ReportFormat>>,

        /// Evaluate all models at once instead of one after another
        #[arg(long)]
        parallel_models: bool,
    },

    /// List available benchmarks
    List,

    /// Validate a configuration file and show the resolved settings
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn parse_report_format(s: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(s).ok_or_else(|| format!("unknown report format '{}'", s))
}
