//! Error types for quick connect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified failure of a quick connect attempt.
///
/// Existing tags never change meaning; new tags may be added, so matches
/// outside this crate need a wildcard arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum QuickConnectError {
    /// No response could be obtained (connection failure, timeout, or an
    /// internal fault while handling the attempt).
    #[error("unexpected error: no response from the device registration service")]
    UnexpectedError,

    /// A response arrived but its status was not 200 or 201.
    #[error("request failed: device registration service rejected the request")]
    RequestFailed,

    /// The poller used up its attempts without observing a success.
    #[error("retry limit reached while waiting for device registration")]
    RetryLimitReached,
}

impl QuickConnectError {
    /// Stable wire tag for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            QuickConnectError::UnexpectedError => "UNEXPECTED_ERROR",
            QuickConnectError::RequestFailed => "REQUEST_FAILED",
            QuickConnectError::RetryLimitReached => "RETRY_LIMIT_REACHED",
        }
    }
}

/// Outcome of one classified attempt: `Ok` is success, `Err` is failure.
pub type QuickConnectResult<T> = Result<T, QuickConnectError>;

/// Errors reported by the transport collaborator.
///
/// Every variant stands for "no usable response" and classifies as
/// [`QuickConnectError::UnexpectedError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connect or read timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// I/O failure after the connection was established.
    #[error("i/o error: {0}")]
    Io(String),

    /// The descriptor could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
