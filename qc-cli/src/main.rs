//! # quick-connect
//!
//! CLI tool for the Assurance quick connect device registration check.
//!
//! ## Commands
//!
//! - `check`: Run one registration status check
//! - `poll`: Check repeatedly until the registration is confirmed
//! - `config`: Show the effective configuration
//!
//! ## Example
//!
//! ```bash
//! # One attempt against the production service
//! quick-connect check --org-id 972C898555E9F7BC7F000101@AdobeOrg --client-id device-1234
//!
//! # Poll a local stub every 500ms, at most 20 times
//! quick-connect --base-url http://127.0.0.1:8080/device \
//!     poll --org-id ORG --client-id device-1234 --interval-ms 500 --max-attempts 20
//!
//! # Show defaults merged with a config file
//! quick-connect --config quick-connect.toml config
//! ```
//!
//! Results are printed to stdout as JSON. Logs go to stderr and follow
//! `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use assurance_qc_types::RegistrationIdentity;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{check, poll, show_config};
use config::Config;

/// CLI tool for the Assurance quick connect device registration check.
#[derive(Parser, Debug)]
#[command(name = "quick-connect")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the device registration base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Identity passed to `check` and `poll`.
#[derive(Args, Debug)]
struct IdentityArgs {
    /// IMS organization id
    #[arg(long)]
    org_id: String,

    /// Device client id
    #[arg(long)]
    client_id: String,
}

impl IdentityArgs {
    fn into_identity(self) -> RegistrationIdentity {
        RegistrationIdentity::new(self.org_id, self.client_id)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one registration status check
    Check {
        #[command(flatten)]
        identity: IdentityArgs,
    },

    /// Check repeatedly until the registration is confirmed
    Poll {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Delay between attempts in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Attempts before giving up
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Show the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.endpoint.base_url = base_url;
    }

    match cli.command {
        Commands::Check { identity } => check::run(&config, identity.into_identity()).await,
        Commands::Poll {
            identity,
            interval_ms,
            max_attempts,
        } => {
            if let Some(interval_ms) = interval_ms {
                config.polling.interval_ms = interval_ms;
            }
            if let Some(max_attempts) = max_attempts {
                config.polling.max_attempts = max_attempts;
            }
            poll::run(&config, identity.into_identity()).await
        }
        Commands::Config => show_config::run(&config),
    }
}
