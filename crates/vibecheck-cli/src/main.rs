//! Vibe Check - Main Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

use vibecheck_cli::{run, Cli};
use vibecheck_common::init_logging;
use vibecheck_config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }

    init_logging(&config.logging)?;
    debug!("Vibe Check {} using backend {}", env!("CARGO_PKG_VERSION"), config.api.base_url);

    if let Err(e) = run(cli, config).await {
        error!("Command failed: {:#}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}
