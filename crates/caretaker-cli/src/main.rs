//! Caretaker CLI - terminal host for wearable emergency alerts
//!
//! Follows the gateway's alert collection, raises each new active alert once,
//! and sends acknowledgements back.

mod cli;
mod commands;
mod error;
mod feed;
mod http;
mod notifier;

use caretaker_core::config::ClientConfig;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::ack::run_ack;
use crate::commands::completions::run_completions;
use crate::commands::list::run_list;
use crate::commands::send::run_send;
use crate::commands::watch::run_watch;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("caretaker=info")),
        )
        .init();

    let cli = Cli::parse();
    let gateway_url = cli.gateway_url.as_deref();
    match cli.command {
        Commands::Watch { no_bell } => run_watch(&resolve_config(gateway_url)?, !no_bell).await,
        Commands::List {
            history,
            limit,
            json,
        } => run_list(&resolve_config(gateway_url)?, history, limit, json).await,
        Commands::Ack { id } => run_ack(&resolve_config(gateway_url)?, &id).await,
        Commands::Send {
            alert_type,
            device_id,
        } => {
            run_send(
                &resolve_config(gateway_url)?,
                &alert_type,
                device_id.as_deref(),
            )
            .await
        }
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}

fn resolve_config(gateway_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::from_env()?;
    match gateway_url {
        Some(url) => Ok(config.with_gateway_url(url)?),
        None => Ok(config),
    }
}

#[cfg(test)]
mod tests;
