//! Registration identity of a device pairing attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The org/client pair a device registers under.
///
/// Fixed at construction. Emptiness is not checked here; an empty id still
/// produces a well-formed request that the service will reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationIdentity {
    org_id: String,
    client_id: String,
}

impl RegistrationIdentity {
    /// Create an identity from an org id and client id.
    pub fn new(org_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            client_id: client_id.into(),
        }
    }

    /// The IMS organization id.
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// The device client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl fmt::Display for RegistrationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org_id, self.client_id)
    }
}
