//! Transport abstraction for quick connect.
//!
//! This module provides a pluggable transport layer that abstracts
//! the underlying HTTP stack (reqwest, mock for testing).
//!
//! # Design
//!
//! The transport trait is async and request-oriented:
//! - `connect()` sends one [`NetworkRequest`] and resolves with exactly one
//!   outcome: a response or a [`TransportError`]
//! - the response exposes its status code and an async `body()` read
//! - dropping the response releases the connection
//!
//! Timeouts are the transport's job. The request carries the connect and read
//! timeouts and an implementation must turn an elapsed timer into
//! [`TransportError::Timeout`] instead of waiting forever.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.queue_status(201, b"{}".to_vec());
//! let response = transport.connect(&request).await?;
//! assert_eq!(response.status_code(), 201);
//! ```

mod http;
mod mock;

pub use http::{HttpResponse, HttpTransport};
pub use mock::{MockOutcome, MockResponse, MockTransport};

use std::sync::Arc;

use assurance_qc_core::HttpStatus;
use assurance_qc_types::{NetworkRequest, TransportError};
use async_trait::async_trait;

/// A response delivered by a [`Transport`].
///
/// The response owns its connection; dropping it is the close operation.
#[async_trait]
pub trait TransportResponse: HttpStatus + Send {
    /// Read the full body.
    ///
    /// The body can be read once; later calls return an error.
    async fn body(&mut self) -> Result<Vec<u8>, TransportError>;
}

/// Transport trait for sending device registration requests.
///
/// Implementations must be safe to share between concurrent checks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Response type produced by this transport.
    type Response: TransportResponse + 'static;

    /// Send `request` and wait for its single outcome.
    async fn connect(&self, request: &NetworkRequest) -> Result<Self::Response, TransportError>;
}

#[async_trait]
impl<T: Transport> Transport for Arc<T> {
    type Response = T::Response;

    async fn connect(&self, request: &NetworkRequest) -> Result<Self::Response, TransportError> {
        (**self).connect(request).await
    }
}
