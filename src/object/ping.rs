//! Error pings, the protocol's error response body.

use serde::Serialize;

use super::errors::ProtocolError;

/// `{"type": "ping", "ping_type": "error", "error_code": ..., "error": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ping {
    #[serde(rename = "type")]
    kind: &'static str,
    ping_type: &'static str,
    pub error_code: u16,
    pub error: String,
    #[serde(skip)]
    pub status_code: u16,
}

impl Ping {
    pub fn from_error<E: ProtocolError + ?Sized>(err: &E) -> Self {
        Self {
            kind: "ping",
            ping_type: "error",
            error_code: err.error_code(),
            error: err.to_string(),
            status_code: err.status_code(),
        }
    }
}
