mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{ChatArgs, Cli, Commands};
use config::CliConfig;
use setup::{init_logging, prepare_relay};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error::handle_error(err);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Chat(ChatArgs::default()));

    if let Commands::Completions { shell } = command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let _guard = init_logging(cli.verbose);
    let mut config = CliConfig::load(cli.config.as_deref());
    config.apply_env_fallbacks();
    let mut relay = prepare_relay(&config)?;

    match command {
        Commands::Chat(args) => commands::chat::run(&mut relay, args).await,
        Commands::Ask(args) => commands::ask::run(&mut relay, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
