//! StatusPoller - repeat status checks until the registration is confirmed.
//!
//! The poller interprets the actions of the pure [`PollState`] machine from
//! `qc-core`: it runs one [`DeviceStatusChecker`] attempt at a time, sleeps
//! between attempts, and reports once. Attempts never overlap, and a result
//! that arrives for an attempt the state machine no longer waits for is
//! dropped.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use assurance_qc_core::{PollAction, PollEvent, PollPolicy, PollState};
use assurance_qc_types::{QuickConnectError, QuickConnectResult};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::checker::DeviceStatusChecker;
use crate::payload::StatusPayload;
use crate::transport::Transport;

/// Polls the registration status endpoint under a [`PollPolicy`].
#[derive(Debug)]
pub struct StatusPoller<T: Transport> {
    checker: DeviceStatusChecker<T>,
    policy: PollPolicy,
}

impl<T: Transport> StatusPoller<T> {
    /// Create a poller around `checker`.
    pub fn new(checker: DeviceStatusChecker<T>, policy: PollPolicy) -> Self {
        Self { checker, policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Poll until the first success or until the attempts run out.
    ///
    /// On exhaustion the result is [`QuickConnectError::RetryLimitReached`].
    pub async fn poll(&self) -> QuickConnectResult<StatusPayload> {
        self.drive(std::future::pending())
            .await
            .unwrap_or(Err(QuickConnectError::UnexpectedError))
    }

    /// Run the state machine until it reports, or until `cancel` resolves.
    ///
    /// Returns `None` when cancelled.
    async fn drive<C>(&self, mut cancel: C) -> Option<QuickConnectResult<StatusPayload>>
    where
        C: Future<Output = ()> + Unpin,
    {
        let mut state = PollState::new();
        let mut events = vec![PollEvent::Start];
        let mut confirmed: Option<StatusPayload> = None;

        while let Some(event) = events.pop() {
            let (next, actions) = state.on_event(&self.policy, event);
            state = next;

            for action in actions {
                match action {
                    PollAction::RunCheck { attempt } => {
                        tracing::debug!(attempt, "Polling device status");
                        tokio::select! {
                            biased;
                            _ = &mut cancel => events.push(PollEvent::Cancel),
                            result = self.checker.check() => match result {
                                Ok(payload) => {
                                    confirmed = Some(payload);
                                    events.push(PollEvent::AttemptSucceeded { attempt });
                                }
                                Err(error) => {
                                    tracing::debug!(attempt, code = error.code(), "Poll attempt failed");
                                    events.push(PollEvent::AttemptFailed { attempt, error });
                                }
                            },
                        }
                    }
                    PollAction::StartRetryTimer { delay } => {
                        tokio::select! {
                            biased;
                            _ = &mut cancel => events.push(PollEvent::Cancel),
                            _ = tokio::time::sleep(delay) => events.push(PollEvent::RetryTimerFired),
                        }
                    }
                    PollAction::ReportSuccess { attempt } => {
                        tracing::info!(
                            attempt,
                            identity = %self.checker.identity(),
                            "Device registration confirmed"
                        );
                        return Some(confirmed.take().ok_or(QuickConnectError::UnexpectedError));
                    }
                    PollAction::ReportFailure { error } => {
                        tracing::warn!(
                            identity = %self.checker.identity(),
                            "Device status polling gave up: {}",
                            error
                        );
                        return Some(Err(error));
                    }
                }
            }
        }

        tracing::debug!(?state, "Device status polling stopped");
        None
    }
}

impl<T: Transport + 'static> StatusPoller<T> {
    /// Poll in the background and hand the final result to `on_result`.
    ///
    /// `on_result` is called at most once: exactly once unless the returned
    /// handle is cancelled first. Dropping the handle does not cancel.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(self, on_result: F) -> PollHandle
    where
        F: FnOnce(QuickConnectResult<StatusPayload>) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let cancel = Box::pin(async move {
            // A dropped handle is not a cancellation
            if cancel_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        });

        let cancelled = Arc::new(Mutex::new(false));
        let gate = Arc::clone(&cancelled);
        let task = tokio::spawn(async move {
            if let Some(result) = self.drive(cancel).await {
                deliver(&gate, result, on_result);
            }
        });

        PollHandle {
            cancel: Some(cancel_tx),
            cancelled,
            task,
        }
    }
}

/// Hand `result` to `on_result` unless the poll was cancelled.
///
/// The flag stays locked while the callback runs, so `cancel()` either
/// waits for a report already underway or prevents it.
fn deliver<F>(cancelled: &Mutex<bool>, result: QuickConnectResult<StatusPayload>, on_result: F)
where
    F: FnOnce(QuickConnectResult<StatusPayload>),
{
    let cancelled = cancelled.lock().unwrap_or_else(PoisonError::into_inner);
    if *cancelled {
        tracing::debug!("Dropping device status result of a cancelled poll");
        return;
    }
    on_result(result);
}

/// Handle to a poll started with [`StatusPoller::spawn`].
#[derive(Debug)]
pub struct PollHandle {
    cancel: Option<oneshot::Sender<()>>,
    cancelled: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling. No result is reported after this returns.
    ///
    /// A check already in flight is abandoned and its response dropped.
    pub fn cancel(&mut self) {
        *self.cancelled.lock().unwrap_or_else(PoisonError::into_inner) = true;
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// True once the poll has reported or stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poll task to end.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            tracing::warn!("Device status poll task failed: {}", e);
        }
    }
}
