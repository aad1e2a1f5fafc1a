use git_profile::app::{run, write_output};
use git_profile::cli::Cli;
use git_profile::error::GitProfileError;
use git_profile::logger::{initialize as LoggerInitialize, level_for};
use git_profile::token::{load_dotenv, token_from_env};
use git_profile::view::render;

use stats_core::config::StatsConfig;

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: &Cli) -> Result<ExitCode, GitProfileError> {
    let log_dir = cli.log_dir();
    create_dir_all(&log_dir).map_err(|e| {
        GitProfileError::logger(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    // Logger first so everything after it is recorded
    LoggerInitialize(&log_dir, level_for(cli.verbose))?;

    info!("git-profile {} starting", env!("CARGO_PKG_VERSION"));
    info!("Log directory: {}", log_dir.display());

    let config = StatsConfig::load(&cli.config_dir()?)?;

    load_dotenv();
    let token = token_from_env();

    let model = run(cli, &config, token).await?;
    let rendered = render(&model, cli.format)?;
    write_output(cli.output.as_deref(), &rendered).await?;

    // Stands in for the error dialog: the view shows it, stderr repeats it
    if let Some(message) = &model.error {
        error!("{message}");
        eprintln!("Error: {message}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
