//! # qc-client
//!
//! Device status checking for the Assurance quick connect pairing flow.
//!
//! A device that has asked to join a remote debugging session must confirm
//! its registration before the event stream can start. This crate performs
//! that confirmation against the device registration service.
//!
//! ## Features
//!
//! - **One attempt, one result**: [`DeviceStatusChecker`] turns every
//!   transport outcome into exactly one classified result
//! - **Transport Abstraction**: Pluggable transport layer (reqwest, mock)
//! - **Polling**: [`StatusPoller`] repeats checks on a fixed cadence
//! - **Pure State Machine**: Uses qc-core for side-effect-free logic
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use assurance_qc_client::{DeviceStatusChecker, EndpointConfig, HttpTransport, RegistrationIdentity};
//!
//! let checker = DeviceStatusChecker::new(
//!     RegistrationIdentity::new("ORG@AdobeOrg", "client-id"),
//!     EndpointConfig::default(),
//!     Arc::new(HttpTransport::new()?),
//! );
//!
//! checker.run(|result| match result {
//!     Ok(payload) => println!("registered ({})", payload.status_code),
//!     Err(e) => println!("not yet: {}", e.code()),
//! });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checker;
pub mod payload;
pub mod poller;
pub mod transport;

pub use checker::DeviceStatusChecker;
pub use payload::StatusPayload;
pub use poller::{PollHandle, StatusPoller};
pub use transport::{
    HttpResponse, HttpTransport, MockOutcome, MockResponse, MockTransport, Transport,
    TransportResponse,
};

pub use assurance_qc_core::{EndpointConfig, HttpStatus, PollPolicy};
pub use assurance_qc_types::{
    QuickConnectError, QuickConnectResult, RegistrationIdentity, TransportError,
};
