//! Mock transport for testing.
//!
//! Allows scripting outcomes and capturing sent requests for verification.
//! Every response handed out is counted when opened and again when dropped,
//! so tests can prove no response is leaked.

use super::{Transport, TransportResponse};
use assurance_qc_core::HttpStatus;
use assurance_qc_types::{NetworkRequest, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted transport outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// Respond with a status and body.
    Respond {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: Vec<u8>,
    },
    /// Respond with a status whose body read fails.
    BrokenBody {
        /// HTTP status code.
        status: u16,
    },
    /// Fail without a response.
    Fail(TransportError),
    /// Never answer; the request's timeouts elapse and `Timeout` is returned.
    Hang,
}

/// Mock transport for testing.
///
/// Clones share state.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
    counters: Arc<ResponseCounters>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    sent_requests: Vec<NetworkRequest>,
    outcomes: VecDeque<MockOutcome>,
    fallback: Option<MockOutcome>,
}

#[derive(Debug, Default)]
struct ResponseCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for a later `connect()` call.
    pub fn queue(&self, outcome: MockOutcome) {
        let mut inner = self.inner.lock().unwrap();
        inner.outcomes.push_back(outcome);
    }

    /// Queue a response with the given status and body.
    pub fn queue_status(&self, status: u16, body: Vec<u8>) {
        self.queue(MockOutcome::Respond { status, body });
    }

    /// Queue a transport failure.
    pub fn queue_failure(&self, error: TransportError) {
        self.queue(MockOutcome::Fail(error));
    }

    /// Outcome used whenever the queue is empty.
    ///
    /// Without a fallback an empty queue fails with `ConnectionFailed`.
    pub fn set_fallback(&self, outcome: MockOutcome) {
        let mut inner = self.inner.lock().unwrap();
        inner.fallback = Some(outcome);
    }

    /// Get all requests that were sent.
    pub fn sent_requests(&self) -> Vec<NetworkRequest> {
        let inner = self.inner.lock().unwrap();
        inner.sent_requests.clone()
    }

    /// Get the last request that was sent.
    pub fn last_request(&self) -> Option<NetworkRequest> {
        let inner = self.inner.lock().unwrap();
        inner.sent_requests.last().cloned()
    }

    /// Number of responses handed out.
    pub fn opened_responses(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Number of responses dropped.
    pub fn closed_responses(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Clear all state (requests, queue, fallback, counters).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTransportInner::default();
        self.counters.opened.store(0, Ordering::SeqCst);
        self.counters.closed.store(0, Ordering::SeqCst);
    }

    fn open(&self, status: u16, body: Result<Vec<u8>, TransportError>) -> MockResponse {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        MockResponse {
            status,
            body: Some(body),
            counters: Arc::clone(&self.counters),
        }
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            counters: Arc::clone(&self.counters),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Response = MockResponse;

    async fn connect(&self, request: &NetworkRequest) -> Result<Self::Response, TransportError> {
        let outcome = {
            let mut inner = self.inner.lock().unwrap();
            inner.sent_requests.push(request.clone());
            inner.outcomes.pop_front().or_else(|| inner.fallback.clone())
        };

        match outcome {
            Some(MockOutcome::Respond { status, body }) => Ok(self.open(status, Ok(body))),
            Some(MockOutcome::BrokenBody { status }) => Ok(self.open(
                status,
                Err(TransportError::Io("connection reset while reading body".into())),
            )),
            Some(MockOutcome::Fail(error)) => Err(error),
            Some(MockOutcome::Hang) => {
                tokio::time::sleep(request.connect_timeout() + request.read_timeout()).await;
                Err(TransportError::Timeout)
            }
            None => Err(TransportError::ConnectionFailed(
                "no mock outcome queued".into(),
            )),
        }
    }
}

/// Response produced by [`MockTransport`].
#[derive(Debug)]
pub struct MockResponse {
    status: u16,
    body: Option<Result<Vec<u8>, TransportError>>,
    counters: Arc<ResponseCounters>,
}

impl HttpStatus for MockResponse {
    fn status_code(&self) -> u16 {
        self.status
    }
}

#[async_trait]
impl TransportResponse for MockResponse {
    async fn body(&mut self) -> Result<Vec<u8>, TransportError> {
        self.body
            .take()
            .unwrap_or_else(|| Err(TransportError::Io("body already consumed".into())))
    }
}

impl Drop for MockResponse {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
