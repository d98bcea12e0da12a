//! # qc-core
//!
//! Pure logic for Assurance quick connect (no I/O, instant tests).
//!
//! This crate builds status requests, classifies transport outcomes, and
//! drives the polling state machine without any network access.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects:
//! - [`build_status_request`] turns an identity into a [`NetworkRequest`](assurance_qc_types::NetworkRequest)
//! - [`classify`] turns a transport outcome into a classified result
//! - [`PollState`] turns poll events into actions
//!
//! The actual I/O is performed by `qc-client`, which sends the requests and
//! interprets the actions produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod endpoint;
pub mod polling;
pub mod request;

pub use classify::{classify, is_success_status, HttpStatus, HTTP_CREATED, HTTP_OK};
pub use endpoint::EndpointConfig;
pub use polling::{PollAction, PollEvent, PollPolicy, PollState};
pub use request::{build_status_request, RequestBuildError};
