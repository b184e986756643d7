//! Decoder types
//!
//! Response wrappers and the service error payload.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Error payload returned by the service on non-success responses.
///
/// Arrives either wrapped (`{"error": {...}}`) or bare.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CloudError {
    /// Machine-readable error code
    #[serde(default)]
    pub code: String,
    /// Human-readable description
    #[serde(default)]
    pub message: String,
    /// Target of the error, e.g. the offending property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Nested errors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudError>,
}

#[derive(Deserialize)]
struct CloudErrorEnvelope {
    error: CloudError,
}

impl CloudError {
    /// Try to decode an error payload from a response body
    pub fn from_body(body: &str) -> Option<Self> {
        if let Ok(envelope) = serde_json::from_str::<CloudErrorEnvelope>(body) {
            return Some(envelope.error);
        }
        serde_json::from_str::<CloudError>(body)
            .ok()
            .filter(|e| !e.code.is_empty() || !e.message.is_empty())
    }
}

/// A decoded body together with the response it came from
#[derive(Debug, Clone)]
pub struct ServiceResponse<T> {
    body: T,
    status: u16,
    headers: HeaderMap,
}

impl<T> ServiceResponse<T> {
    /// Create a new service response
    pub fn new(body: T, status: u16, headers: HeaderMap) -> Self {
        Self {
            body,
            status,
            headers,
        }
    }

    /// Decoded body
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Mutable access to the decoded body
    pub fn body_mut(&mut self) -> &mut T {
        &mut self.body
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request id assigned by the service, when present
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-ms-request-id")
            .and_then(|v| v.to_str().ok())
    }

    /// Take the decoded body
    pub fn into_body(self) -> T {
        self.body
    }

    /// Transform the body, keeping status and headers
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResponse<U> {
        ServiceResponse {
            body: f(self.body),
            status: self.status,
            headers: self.headers,
        }
    }
}
