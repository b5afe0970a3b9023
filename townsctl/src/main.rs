//! This is a command-line client for the outdoor towns directory. Most
//! commands go through the locations api, the `admin` commands work on the
//! database directly via [libtowns].
use crate::{
    cli::{Cli, Commands},
    client::LocationClient,
    config::{Config, config_file},
};
use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

mod cli;
mod client;
mod commands;
mod config;
mod output;
mod view;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("TOWNS_LOG"))
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();
    let config_file = config_file()?;
    let stored = match Config::load_from_file(&config_file).await {
        Ok(cfg) => cfg,
        Err(e) => {
            debug!(?e, "No usable config file, using defaults");
            Config::default()
        }
    };
    let cfg = stored.override_with(args.api_url, args.timeout, args.map_token);

    match args.command {
        Commands::Configure => {
            cfg.save_to_file(&config_file).await?;
            println!("Saved configuration to '{}'", config_file.display());
            println!("Using api at {}", cfg.api_url());
            Ok(())
        }
        Commands::Admin { database, command } => {
            commands::admin::handle_command(database, command).await
        }
        command => {
            debug!(api_url = cfg.api_url(), "Connecting to api");
            let client = LocationClient::new(cfg.api_url(), cfg.timeout())?;
            commands::locations::handle_command(command, &client, cfg.map_token()).await
        }
    }
}
