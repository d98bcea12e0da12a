//! Poll until the registration is confirmed.

use anyhow::{Context, Result};
use assurance_qc_client::{DeviceStatusChecker, HttpTransport, StatusPoller};
use assurance_qc_types::RegistrationIdentity;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::config::Config;

/// Exit status after Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

/// Run the poll command.
pub async fn run(config: &Config, identity: RegistrationIdentity) -> Result<ExitCode> {
    let transport = Arc::new(
        HttpTransport::with_connect_timeout(Duration::from_millis(
            config.endpoint.connect_timeout_ms,
        ))
        .context("Failed to create HTTP client")?,
    );
    let checker = DeviceStatusChecker::new(identity, config.endpoint.clone(), transport);
    let poller = StatusPoller::new(checker, config.polling.policy());

    tracing::info!(
        interval_ms = config.polling.interval_ms,
        max_attempts = config.polling.max_attempts,
        "Polling {}",
        config.endpoint.status_url()
    );

    let (tx, rx) = oneshot::channel();
    let mut handle = poller.spawn(move |result| {
        let _ = tx.send(result);
    });

    tokio::select! {
        result = rx => {
            let result = result.context("Polling ended without a result")?;
            super::print_result(&result)?;
            Ok(super::exit_code(&result))
        }
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            handle.finished().await;
            tracing::info!("Polling cancelled");
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
    }
}
