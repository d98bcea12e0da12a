//! Status request construction.
//!
//! Pure transform from ([`EndpointConfig`], [`RegistrationIdentity`]) to a
//! [`NetworkRequest`]. Nothing here touches the network.

use std::collections::BTreeMap;

use assurance_qc_types::{
    HttpMethod, NetworkRequest, RegistrationIdentity, CONTENT_TYPE_JSON, HEADER_ACCEPT,
    HEADER_CONTENT_TYPE,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::endpoint::EndpointConfig;

/// Error building a request.
#[derive(Debug, Error)]
pub enum RequestBuildError {
    /// The JSON body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Build the registration status request for `identity`.
///
/// Body: `{"<org_id_key>": org_id, "<client_id_key>": client_id}` as UTF-8
/// JSON. Both `Accept` and `Content-Type` are `application/json`.
pub fn build_status_request(
    endpoint: &EndpointConfig,
    identity: &RegistrationIdentity,
) -> Result<NetworkRequest, RequestBuildError> {
    let mut body = Map::new();
    body.insert(
        endpoint.org_id_key.clone(),
        Value::String(identity.org_id().to_string()),
    );
    body.insert(
        endpoint.client_id_key.clone(),
        Value::String(identity.client_id().to_string()),
    );
    let body = serde_json::to_vec(&Value::Object(body))?;

    Ok(NetworkRequest {
        url: endpoint.status_url(),
        method: HttpMethod::Post,
        body,
        headers: json_headers(),
        connect_timeout_ms: endpoint.connect_timeout_ms,
        read_timeout_ms: endpoint.read_timeout_ms,
    })
}

fn json_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(HEADER_ACCEPT.to_string(), CONTENT_TYPE_JSON.to_string());
    headers.insert(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string());
    headers
}
