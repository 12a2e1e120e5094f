//! Command routing

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands::{self, RunOptions};

/// Dispatch a parsed command line
pub async fn route(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            benchmarks,
            data_dir,
            output_dir,
            format,
            parallel_models,
        } => {
            commands::run(RunOptions {
                config_path: config,
                benchmarks,
                data_dir,
                output_dir,
                formats: format,
                parallel_models,
            })
            .await
        }
        Commands::List => commands::list(),
        Commands::Validate { config } => commands::validate(&config),
    }
}
