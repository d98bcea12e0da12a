//! Show the effective configuration.

use anyhow::Result;
use std::process::ExitCode;

use crate::config::Config;

/// Run the config command.
pub fn run(config: &Config) -> Result<ExitCode> {
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}
