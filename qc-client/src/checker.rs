//! DeviceStatusChecker - one registration status attempt.
//!
//! # Lifecycle
//!
//! ```text
//! build request → Transport::connect → classify → read body → release → callback
//! ```
//!
//! Each attempt is independent: the checker keeps no state between calls, so
//! the same checker can be run repeatedly by a poller or concurrently with
//! other checkers sharing one transport.

use std::sync::Arc;

use assurance_qc_core::{build_status_request, classify, EndpointConfig, HttpStatus};
use assurance_qc_types::{QuickConnectError, QuickConnectResult, RegistrationIdentity};

use crate::payload::StatusPayload;
use crate::transport::{Transport, TransportResponse};

/// Checks whether a device registration has been confirmed by the service.
pub struct DeviceStatusChecker<T: Transport> {
    identity: RegistrationIdentity,
    endpoint: EndpointConfig,
    transport: Arc<T>,
}

impl<T: Transport> DeviceStatusChecker<T> {
    /// Create a checker for `identity` against `endpoint`.
    pub fn new(identity: RegistrationIdentity, endpoint: EndpointConfig, transport: Arc<T>) -> Self {
        Self {
            identity,
            endpoint,
            transport,
        }
    }

    /// Identity this checker registers.
    pub fn identity(&self) -> &RegistrationIdentity {
        &self.identity
    }

    /// Perform one attempt and return its classified result.
    ///
    /// Never panics on transport or protocol failures; every outcome maps to
    /// `Ok(payload)` or one [`QuickConnectError`]. The transport response is
    /// released before this returns.
    pub async fn check(&self) -> QuickConnectResult<StatusPayload> {
        let request = match build_status_request(&self.endpoint, &self.identity) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Failed to build status request for {}: {}", self.identity, e);
                return Err(QuickConnectError::UnexpectedError);
            }
        };

        tracing::debug!(url = %request.url, identity = %self.identity, "Checking device status");

        let outcome = self.transport.connect(&request).await;
        if let Err(e) = &outcome {
            tracing::debug!("Status request failed: {}", e);
        }

        let mut response = match classify(outcome) {
            Ok(response) => response,
            Err(kind) => {
                tracing::debug!(code = kind.code(), "Device status check failed");
                return Err(kind);
            }
        };

        let status_code = response.status_code();
        let body = response.body().await;
        drop(response);

        match body {
            Ok(body) => {
                tracing::debug!(status_code, "Device status confirmed");
                Ok(StatusPayload { status_code, body })
            }
            Err(e) => {
                tracing::warn!("Failed to read status response body: {}", e);
                Err(QuickConnectError::UnexpectedError)
            }
        }
    }
}

impl<T: Transport + 'static> DeviceStatusChecker<T> {
    /// Run one attempt in the background and hand its result to `on_result`.
    ///
    /// Returns immediately. `on_result` is called exactly once, from a Tokio
    /// worker, after the transport has completed and the response has been
    /// released. A panic inside the attempt is reported as
    /// [`QuickConnectError::UnexpectedError`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run<F>(self, on_result: F)
    where
        F: FnOnce(QuickConnectResult<StatusPayload>) + Send + 'static,
    {
        tokio::spawn(async move {
            let attempt = tokio::spawn(async move { self.check().await });
            let result = match attempt.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Device status check aborted: {}", e);
                    Err(QuickConnectError::UnexpectedError)
                }
            };
            on_result(result);
        });
    }
}

impl<T: Transport> Clone for DeviceStatusChecker<T> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            endpoint: self.endpoint.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> std::fmt::Debug for DeviceStatusChecker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceStatusChecker")
            .field("identity", &self.identity)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockOutcome, MockResponse, MockTransport};
    use assurance_qc_types::{NetworkRequest, TransportError};
    use async_trait::async_trait;
    use rand::Rng;
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot};

    fn checker(transport: &MockTransport) -> DeviceStatusChecker<MockTransport> {
        DeviceStatusChecker::new(
            RegistrationIdentity::new("ORG@AdobeOrg", "client-1"),
            EndpointConfig::default().with_base_url("http://stub/device"),
            Arc::new(transport.clone()),
        )
    }

    async fn run_and_wait(
        checker: DeviceStatusChecker<MockTransport>,
    ) -> QuickConnectResult<StatusPayload> {
        let (tx, rx) = oneshot::channel();
        checker.run(move |result| {
            let _ = tx.send(result);
        });
        rx.await.unwrap()
    }

    // ===========================================
    // Classification Scenarios
    // ===========================================

    #[tokio::test]
    async fn created_with_body_is_success() {
        let transport = MockTransport::new();
        transport.queue_status(201, br#"{"status":"connected"}"#.to_vec());

        let result = checker(&transport).check().await;

        let payload = result.unwrap();
        assert_eq!(payload.status_code, 201);
        assert_eq!(payload.body, br#"{"status":"connected"}"#);
    }

    #[tokio::test]
    async fn ok_is_success() {
        let transport = MockTransport::new();
        transport.queue_status(200, vec![]);

        let payload = checker(&transport).check().await.unwrap();
        assert_eq!(payload.status_code, 200);
    }

    #[tokio::test]
    async fn forbidden_is_request_failed() {
        let transport = MockTransport::new();
        transport.queue_status(403, b"denied".to_vec());

        let result = checker(&transport).check().await;
        assert_eq!(result, Err(QuickConnectError::RequestFailed));
    }

    #[tokio::test]
    async fn no_content_is_request_failed() {
        let transport = MockTransport::new();
        transport.queue_status(204, vec![]);

        let result = checker(&transport).check().await;
        assert_eq!(result, Err(QuickConnectError::RequestFailed));
    }

    #[tokio::test]
    async fn dropped_connection_is_unexpected_error() {
        let transport = MockTransport::new();
        transport.queue_failure(TransportError::ConnectionFailed("connection reset".into()));

        let result = checker(&transport).check().await;
        assert_eq!(result, Err(QuickConnectError::UnexpectedError));
        assert_eq!(transport.opened_responses(), 0);
        assert_eq!(transport.closed_responses(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_transport_times_out_to_unexpected_error() {
        let transport = MockTransport::new();
        transport.queue(MockOutcome::Hang);

        let result = checker(&transport).check().await;
        assert_eq!(result, Err(QuickConnectError::UnexpectedError));
    }

    #[tokio::test]
    async fn unreadable_body_is_unexpected_error() {
        let transport = MockTransport::new();
        transport.queue(MockOutcome::BrokenBody { status: 200 });

        let result = checker(&transport).check().await;
        assert_eq!(result, Err(QuickConnectError::UnexpectedError));
        assert_eq!(transport.closed_responses(), 1);
    }

    // ===========================================
    // Request Tests
    // ===========================================

    #[tokio::test]
    async fn sends_status_request_for_identity() {
        let transport = MockTransport::new();
        transport.queue_status(200, vec![]);

        checker(&transport).check().await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://stub/device/status");
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["orgId"], "ORG@AdobeOrg");
        assert_eq!(body["clientId"], "client-1");
    }

    // ===========================================
    // Resource Release Tests
    // ===========================================

    #[tokio::test]
    async fn response_released_on_success_and_failure() {
        let transport = MockTransport::new();
        transport.queue_status(201, b"ok".to_vec());
        transport.queue_status(500, b"boom".to_vec());

        let checker = checker(&transport);
        let _ = checker.check().await;
        assert_eq!(transport.closed_responses(), 1);
        let _ = checker.check().await;
        assert_eq!(transport.closed_responses(), 2);
        assert_eq!(transport.opened_responses(), 2);
    }

    #[tokio::test]
    async fn response_released_before_callback() {
        let transport = MockTransport::new();
        transport.queue_status(200, vec![]);

        let (tx, rx) = oneshot::channel();
        let observer = transport.clone();
        checker(&transport).run(move |result| {
            let _ = tx.send((result, observer.closed_responses()));
        });

        let (result, closed_at_callback) = rx.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(closed_at_callback, 1);
    }

    // ===========================================
    // Callback Delivery Tests
    // ===========================================

    #[tokio::test]
    async fn run_delivers_result_through_callback() {
        let transport = MockTransport::new();
        transport.queue_status(201, vec![]);

        let result = run_and_wait(checker(&transport)).await;
        assert_eq!(result.unwrap().status_code, 201);
    }

    #[tokio::test(start_paused = true)]
    async fn run_returns_before_transport_completes() {
        let transport = MockTransport::new();
        transport.queue(MockOutcome::Hang);

        let (tx, mut rx) = oneshot::channel();
        checker(&transport).run(move |result| {
            let _ = tx.send(result);
        });
        assert!(rx.try_recv().is_err());

        let result = rx.await.unwrap();
        assert_eq!(result, Err(QuickConnectError::UnexpectedError));
    }

    /// Transport whose connect panics.
    struct PanickingTransport;

    #[async_trait]
    impl Transport for PanickingTransport {
        type Response = MockResponse;

        async fn connect(&self, _request: &NetworkRequest) -> Result<Self::Response, TransportError> {
            panic!("transport bug");
        }
    }

    #[tokio::test]
    async fn panic_inside_attempt_becomes_unexpected_error() {
        let checker = DeviceStatusChecker::new(
            RegistrationIdentity::new("org", "client"),
            EndpointConfig::default(),
            Arc::new(PanickingTransport),
        );

        let (tx, rx) = oneshot::channel();
        checker.run(move |result| {
            let _ = tx.send(result);
        });

        assert_eq!(rx.await.unwrap(), Err(QuickConnectError::UnexpectedError));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn every_run_calls_back_exactly_once() {
        const RUNS: usize = 1000;

        let transport = MockTransport::new();
        let mut expected_success = 0;
        {
            let mut rng = rand::thread_rng();
            for _ in 0..RUNS {
                let outcome = match rng.gen_range(0..6) {
                    0 => MockOutcome::Fail(TransportError::ConnectionFailed("dropped".into())),
                    1 => MockOutcome::Respond {
                        status: 200,
                        body: b"{}".to_vec(),
                    },
                    2 => MockOutcome::Respond {
                        status: 201,
                        body: vec![],
                    },
                    3 => MockOutcome::Respond {
                        status: [400, 403, 404, 500, 503][rng.gen_range(0..5)],
                        body: vec![],
                    },
                    4 => MockOutcome::BrokenBody { status: 201 },
                    _ => MockOutcome::Hang,
                };
                if matches!(outcome, MockOutcome::Respond { status: 200 | 201, .. }) {
                    expected_success += 1;
                }
                transport.queue(outcome);
            }
        }

        let checker = DeviceStatusChecker::new(
            RegistrationIdentity::new("org", "client"),
            EndpointConfig::default().with_timeouts(1, 1),
            Arc::new(transport.clone()),
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        for i in 0..RUNS {
            let tx = tx.clone();
            checker.clone().run(move |result| {
                let _ = tx.send((i, result));
            });
        }
        drop(tx);

        let mut seen = vec![0u32; RUNS];
        let mut successes = 0;
        // Channel closes once every callback has consumed its sender
        while let Some((i, result)) = tokio::time::timeout(Duration::from_secs(30), rx.recv())
            .await
            .unwrap()
        {
            seen[i] += 1;
            if result.is_ok() {
                successes += 1;
            }
        }

        assert!(seen.iter().all(|&count| count == 1));
        assert_eq!(successes, expected_success);
        assert_eq!(transport.sent_requests().len(), RUNS);
        assert_eq!(transport.opened_responses(), transport.closed_responses());
    }

    // ===========================================
    // Independence Tests
    // ===========================================

    #[tokio::test]
    async fn repeated_runs_are_independent() {
        let transport = MockTransport::new();
        transport.set_fallback(MockOutcome::Respond {
            status: 200,
            body: b"same".to_vec(),
        });

        let checker = checker(&transport);
        let first = run_and_wait(checker.clone()).await;
        let second = run_and_wait(checker).await;

        assert_eq!(first, second);
        assert!(first.is_ok());
    }

    #[tokio::test]
    async fn concurrent_checkers_share_one_transport() {
        let transport = Arc::new(MockTransport::new());
        transport.set_fallback(MockOutcome::Respond {
            status: 201,
            body: vec![],
        });

        let a = DeviceStatusChecker::new(
            RegistrationIdentity::new("org", "device-a"),
            EndpointConfig::default(),
            Arc::clone(&transport),
        );
        let b = DeviceStatusChecker::new(
            RegistrationIdentity::new("org", "device-b"),
            EndpointConfig::default(),
            Arc::clone(&transport),
        );

        let (ra, rb) = tokio::join!(a.check(), b.check());
        assert!(ra.is_ok() && rb.is_ok());

        let mut clients: Vec<String> = transport
            .sent_requests()
            .iter()
            .map(|r| {
                let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                body["clientId"].as_str().unwrap().to_string()
            })
            .collect();
        clients.sort();
        assert_eq!(clients, vec!["device-a", "device-b"]);
    }
}
