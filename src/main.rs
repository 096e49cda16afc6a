//! annotrack - annotation batch and work log tracker
//!
//! Serves the record store over HTTP, or runs one-off maintenance commands.

#![allow(missing_docs)]

use annotrack::config::{ConfigSource, DEFAULT_CONFIG_PATH};
use annotrack::core::store::{RecordStore, StoreOptions};
use annotrack::utils::logging::init_logging;
use annotrack::{Config, Result, server, storage};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "annotrack", version, about)]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(short, long, env = "ANNOTRACK_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// Override `server.host`
    #[arg(long, global = true)]
    host: Option<String>,

    /// Override `server.port`
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Override `storage.data_dir`
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Replace the batch table with the default batch set
    Seed,
    /// Validate the configuration and print the effective result
    CheckConfig,
}

impl Cli {
    async fn load_config(&self) -> Result<(Config, ConfigSource)> {
        let (mut config, source) = Config::load(&self.config).await?;

        if let Some(host) = &self.host {
            config.service.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.service.server.port = port;
        }
        if let Some(data_dir) = &self.data_dir {
            config.service.storage.data_dir = data_dir.clone();
        }

        config.validate()?;
        Ok((config, source))
    }
}

async fn seed(config: &Config) -> Result<()> {
    let sheets = storage::open(config.storage()).await?;
    let store = RecordStore::open(
        sheets,
        StoreOptions {
            unique_ids: config.storage().unique_ids,
        },
    )
    .await?;

    let count = store.seed_defaults().await?;
    info!(
        "Wrote {} default batches to the {} backend",
        count,
        store.backend_name()
    );
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let (config, source) = cli.load_config().await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            init_logging(config.logging())?;
            source.log();
            server::run_server(config).await
        }
        Command::Seed => {
            init_logging(config.logging())?;
            source.log();
            seed(&config).await
        }
        Command::CheckConfig => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
