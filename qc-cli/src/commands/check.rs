//! Run one registration status check.

use anyhow::{Context, Result};
use assurance_qc_client::{DeviceStatusChecker, HttpTransport};
use assurance_qc_types::RegistrationIdentity;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::config::Config;

/// Run the check command.
pub async fn run(config: &Config, identity: RegistrationIdentity) -> Result<ExitCode> {
    let transport = Arc::new(
        HttpTransport::with_connect_timeout(Duration::from_millis(
            config.endpoint.connect_timeout_ms,
        ))
        .context("Failed to create HTTP client")?,
    );
    let checker = DeviceStatusChecker::new(identity, config.endpoint.clone(), transport);

    let (tx, rx) = oneshot::channel();
    checker.run(move |result| {
        let _ = tx.send(result);
    });
    let result = rx.await.context("Status check ended without a result")?;

    super::print_result(&result)?;
    Ok(super::exit_code(&result))
}
