//! # Lineup CLI Binary

use anyhow::Result;
use clap::Parser;
use lineup_cli::{logging, Cli, CliHandler, LineupConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LineupConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    logging::initialize_logging(&config.logging)?;

    let mut handler = CliHandler::new(config, cli.json)?;
    handler.handle_command(cli.command).await?;

    Ok(())
}
