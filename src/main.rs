//! cod - chain of density summarizer
//!
//! Main entry point: loads `.env`, parses arguments, resolves configuration,
//! and runs the summarize pipeline. Logs go to stderr; stdout carries only
//! the summaries.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chain_of_density::cli::Cli;
use chain_of_density::commands;
use chain_of_density::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key may already be exported
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config_path = cli.config.as_deref().unwrap_or("cod.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    tracing::info!("Summarizing {}", cli.file.display());
    commands::summarize::run_summarize(config, &cli.file, cli.format).await?;
    Ok(())
}

/// Initialize tracing subscriber with environment filter, writing to stderr
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "chain_of_density=debug,cod=debug"
    } else {
        "chain_of_density=info,cod=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
