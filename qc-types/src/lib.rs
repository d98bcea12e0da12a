//! # qc-types
//!
//! Shared types for the Assurance quick connect pairing flow.
//!
//! This crate provides the foundational types used across all quick connect crates:
//! - [`RegistrationIdentity`] - The org/client pair a device registers with
//! - [`NetworkRequest`], [`HttpMethod`] - Transport-ready request descriptor
//! - [`QuickConnectError`], [`QuickConnectResult`] - Classified outcome of one attempt
//! - [`TransportError`] - Failures reported by the transport collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod identity;
mod request;

pub use error::{QuickConnectError, QuickConnectResult, TransportError};
pub use identity::RegistrationIdentity;
pub use request::{
    HttpMethod, NetworkRequest, CONTENT_TYPE_JSON, HEADER_ACCEPT, HEADER_CONTENT_TYPE,
};
