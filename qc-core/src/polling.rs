//! Registration status polling state machine.
//!
//! A device polls the status endpoint until the service reports it as
//! registered or a fixed number of attempts has been used. This module holds
//! only the transitions; `qc-client` runs the checks and timers the actions
//! ask for.
//!
//! Every completion event names the attempt it belongs to. Completions for any
//! attempt other than the one in flight are stale and leave the state
//! untouched, so a late response can never produce a second report.

use std::time::Duration;

use assurance_qc_types::QuickConnectError;

/// Default delay between attempts (2 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default attempt budget (150 attempts, five minutes at the default interval).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 150;

/// Cadence and budget of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between the end of one attempt and the start of the next.
    pub interval: Duration,
    /// Attempts allowed before giving up. Zero is treated as one.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollPolicy {
    /// Create a policy.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    fn budget(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Poll state - NO I/O, just state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Not started.
    Idle,
    /// A status check is in flight.
    Checking {
        /// 1-based number of the in-flight attempt.
        attempt: u32,
    },
    /// Between attempts, waiting for the retry timer.
    Waiting {
        /// Number of the attempt that just failed.
        attempt: u32,
    },
    /// The service confirmed the registration.
    Connected {
        /// Attempt that succeeded.
        attempt: u32,
    },
    /// Every allowed attempt failed.
    Exhausted {
        /// Attempts made.
        attempts: u32,
    },
    /// The caller stopped the poll.
    Cancelled,
}

/// Inputs to the poll state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// Caller asked to begin polling.
    Start,
    /// A status check returned success.
    AttemptSucceeded {
        /// Attempt the result belongs to.
        attempt: u32,
    },
    /// A status check returned a failure.
    AttemptFailed {
        /// Attempt the result belongs to.
        attempt: u32,
        /// Classified failure.
        error: QuickConnectError,
    },
    /// The retry timer elapsed.
    RetryTimerFired,
    /// Caller asked to stop.
    Cancel,
}

/// Side effects the driver must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollAction {
    /// Run one status check.
    RunCheck {
        /// Attempt number to tag the result with.
        attempt: u32,
    },
    /// Arm the retry timer.
    StartRetryTimer {
        /// How long to wait.
        delay: Duration,
    },
    /// Deliver the successful result to the caller.
    ReportSuccess {
        /// Attempt that succeeded.
        attempt: u32,
    },
    /// Deliver a terminal failure to the caller.
    ReportFailure {
        /// Terminal failure.
        error: QuickConnectError,
    },
}

impl PollState {
    /// Create a state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event under `policy` and return the new state plus actions.
    ///
    /// Pure function; the caller executes the returned actions.
    pub fn on_event(self, policy: &PollPolicy, event: PollEvent) -> (Self, Vec<PollAction>) {
        match (self, event) {
            (Self::Idle, PollEvent::Start) => (
                Self::Checking { attempt: 1 },
                vec![PollAction::RunCheck { attempt: 1 }],
            ),

            (Self::Checking { attempt }, PollEvent::AttemptSucceeded { attempt: done })
                if done == attempt =>
            {
                (
                    Self::Connected { attempt },
                    vec![PollAction::ReportSuccess { attempt }],
                )
            }
            (Self::Checking { attempt }, PollEvent::AttemptFailed { attempt: done, .. })
                if done == attempt =>
            {
                if attempt >= policy.budget() {
                    (
                        Self::Exhausted { attempts: attempt },
                        vec![PollAction::ReportFailure {
                            error: QuickConnectError::RetryLimitReached,
                        }],
                    )
                } else {
                    (
                        Self::Waiting { attempt },
                        vec![PollAction::StartRetryTimer {
                            delay: policy.interval,
                        }],
                    )
                }
            }

            (Self::Waiting { attempt }, PollEvent::RetryTimerFired) => {
                let next = attempt.saturating_add(1);
                (
                    Self::Checking { attempt: next },
                    vec![PollAction::RunCheck { attempt: next }],
                )
            }

            (Self::Idle | Self::Checking { .. } | Self::Waiting { .. }, PollEvent::Cancel) => {
                (Self::Cancelled, vec![])
            }

            // Stale completions, duplicate starts, and anything after a
            // terminal state - stay put
            (state, _) => (state, vec![]),
        }
    }

    /// True once no further actions can be produced.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Connected { .. } | Self::Exhausted { .. } | Self::Cancelled
        )
    }

    /// Attempt currently in flight, if any.
    pub fn in_flight(&self) -> Option<u32> {
        match self {
            Self::Checking { attempt } => Some(*attempt),
            _ => None,
        }
    }
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}
