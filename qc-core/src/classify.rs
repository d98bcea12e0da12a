//! Response classification.
//!
//! Maps a raw transport outcome onto the closed result space. Success is
//! exactly HTTP 200 or 201; other 2xx codes are failures.

use assurance_qc_types::{QuickConnectError, QuickConnectResult, TransportError};

/// HTTP 200 OK.
pub const HTTP_OK: u16 = 200;

/// HTTP 201 Created.
pub const HTTP_CREATED: u16 = 201;

/// Anything that carries an HTTP status code.
pub trait HttpStatus {
    /// The response status code.
    fn status_code(&self) -> u16;
}

impl HttpStatus for u16 {
    fn status_code(&self) -> u16 {
        *self
    }
}

/// Returns true for the two status codes the service uses for success.
pub fn is_success_status(code: u16) -> bool {
    code == HTTP_OK || code == HTTP_CREATED
}

/// Classify one transport outcome.
///
/// A transport error never has a status to read, so it is matched first and
/// becomes [`QuickConnectError::UnexpectedError`]. A response with a status
/// other than 200/201 becomes [`QuickConnectError::RequestFailed`] and is
/// dropped here, which releases it.
pub fn classify<R: HttpStatus>(outcome: Result<R, TransportError>) -> QuickConnectResult<R> {
    let response = match outcome {
        Ok(response) => response,
        Err(_) => return Err(QuickConnectError::UnexpectedError),
    };

    if is_success_status(response.status_code()) {
        Ok(response)
    } else {
        Err(QuickConnectError::RequestFailed)
    }
}
