//! HttpTransport - Real HTTP transport using reqwest.
//!
//! This transport implements the Transport trait with a shared
//! `reqwest::Client`. Timeouts:
//! - establishing the connection is bounded by the client's connect timeout
//!   (see [`HttpTransport::with_connect_timeout`])
//! - sending and waiting for response headers is bounded by the request's
//!   connect + read
//! - reading the body is bounded by the request's read

use super::{Transport, TransportResponse};
use assurance_qc_core::HttpStatus;
use assurance_qc_types::{HttpMethod, NetworkRequest, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("assurance-qc/", env!("CARGO_PKG_VERSION"));

/// HttpTransport implements the Transport trait using reqwest.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// let transport = HttpTransport::new()?;
/// let response = transport.connect(&request).await?;
/// println!("status: {}", response.status_code());
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HttpTransport with its own connection pool.
    pub fn new() -> Result<Self, TransportError> {
        Self::build(reqwest::Client::builder())
    }

    /// Create a transport whose connection attempts give up after `timeout`.
    ///
    /// Pass the endpoint's connect timeout so an unresponsive host fails on
    /// that deadline rather than the longer header deadline.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, TransportError> {
        Self::build(reqwest::Client::builder().connect_timeout(timeout))
    }

    fn build(builder: reqwest::ClientBuilder) -> Result<Self, TransportError> {
        let client = builder
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = HttpResponse;

    async fn connect(&self, request: &NetworkRequest) -> Result<Self::Response, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let header_deadline = request.connect_timeout() + request.read_timeout();
        let response = tokio::time::timeout(header_deadline, builder.send())
            .await
            .map_err(|_| TransportError::Timeout)?
            .map_err(transport_error)?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            inner: Some(response),
            read_timeout: request.read_timeout(),
        })
    }
}

/// Map a reqwest failure onto the transport error space.
fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::ConnectionFailed(e.to_string())
    } else if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else {
        TransportError::Io(e.to_string())
    }
}

/// Response produced by [`HttpTransport`].
///
/// Dropping it returns the connection to the pool or closes it.
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    inner: Option<reqwest::Response>,
    read_timeout: Duration,
}

impl HttpStatus for HttpResponse {
    fn status_code(&self) -> u16 {
        self.status
    }
}

#[async_trait]
impl TransportResponse for HttpResponse {
    async fn body(&mut self) -> Result<Vec<u8>, TransportError> {
        let response = self
            .inner
            .take()
            .ok_or_else(|| TransportError::Io("body already consumed".into()))?;

        let bytes = tokio::time::timeout(self.read_timeout, response.bytes())
            .await
            .map_err(|_| TransportError::Timeout)?
            .map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}
