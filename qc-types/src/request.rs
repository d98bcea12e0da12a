//! Transport-ready request descriptor.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// `Accept` header name.
pub const HEADER_ACCEPT: &str = "Accept";

/// `Content-Type` header name.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// JSON media type.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP method of a [`NetworkRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A fully formed request handed to the transport.
///
/// Stateless; a new one is built for every attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    /// Absolute URL.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Encoded request body.
    pub body: Vec<u8>,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds.
    pub read_timeout_ms: u64,
}

impl NetworkRequest {
    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Read timeout as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Look up a header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

// Body may carry identifiers; show only its size.
impl fmt::Debug for NetworkRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("body", &format!("[{} bytes]", self.body.len()))
            .field("headers", &self.headers)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .finish()
    }
}
