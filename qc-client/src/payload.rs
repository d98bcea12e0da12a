//! Owned success payload of a status check.

use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Status and body of a successful status response.
///
/// Read out of the transport response before that response is released, so
/// holding a payload never keeps a connection open.
#[derive(Clone, PartialEq, Eq)]
pub struct StatusPayload {
    /// HTTP status code (200 or 201).
    pub status_code: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl StatusPayload {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

// Session responses can carry tokens; never print the body.
impl std::fmt::Debug for StatusPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPayload")
            .field("status_code", &self.status_code)
            .field("body", &format!("[{} bytes REDACTED]", self.body.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct SessionInfo {
        session_uuid: String,
    }

    #[test]
    fn decodes_json_body() {
        let payload = StatusPayload {
            status_code: 200,
            body: br#"{"sessionUuid":"abc-123"}"#.to_vec(),
        };
        let info: SessionInfo = payload.json().unwrap();
        assert_eq!(info.session_uuid, "abc-123");
    }

    #[test]
    fn json_error_on_non_json_body() {
        let payload = StatusPayload {
            status_code: 201,
            body: b"created".to_vec(),
        };
        assert!(payload.json::<SessionInfo>().is_err());
        assert_eq!(payload.body_text(), "created");
    }

    #[test]
    fn debug_redacts_body() {
        let payload = StatusPayload {
            status_code: 200,
            body: b"secret-token".to_vec(),
        };
        let debug = format!("{:?}", payload);
        assert!(debug.contains("[12 bytes REDACTED]"), "got: {}", debug);
        assert!(!debug.contains("secret-token"));
    }
}
