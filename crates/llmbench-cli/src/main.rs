//! llmbench command-line application
//!
//! Runs the configured benchmarks against every configured model and writes
//! one report per model.
//!
//! # Commands
//!
//! - `llmbench run`: evaluate every model in the config file
//! - `llmbench list`: show the benchmarks this build can run
//! - `llmbench validate`: check a config file and print what a run would use
//!
//! Logging goes to stderr. `RUST_LOG` overrides the level chosen by `-v`.

mod args;
mod commands;
mod console;
mod progress;
mod router;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, LogFormat};

fn init_logging(format: LogFormat, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);
    router::route(cli).await
}
