//! Error types for paged-rest
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::decode::CloudError;
use std::fmt;
use thiserror::Error;

/// Why an in-flight request was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller canceled the call through its `ServiceCall` handle
    Requested,
    /// The transport gave up waiting for the response
    TimedOut {
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "canceled by caller"),
            Self::TimedOut { timeout_ms } => write!(f, "timed out after {timeout_ms}ms"),
        }
    }
}

/// The main error type for paged-rest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Local Errors
    // ============================================================================
    #[error("Parameter {parameter} is required and cannot be null.")]
    Validation { parameter: String },

    #[error("Unknown value '{value}' for {type_name}")]
    UnknownEnumValue { type_name: String, value: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request {reason}")]
    Canceled { reason: CancelReason },

    // ============================================================================
    // Service Errors
    // ============================================================================
    #[error("{}", service_message(.status, .error, .body))]
    Service {
        status: u16,
        error: Option<CloudError>,
        body: String,
    },

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

fn service_message(status: &u16, error: &Option<CloudError>, body: &str) -> String {
    match error {
        Some(e) => format!("HTTP {status}: {}: {}", e.code, e.message),
        None if body.is_empty() => format!("HTTP {status}"),
        None => format!("HTTP {status}: {body}"),
    }
}

impl Error {
    /// Create a validation error for a missing required parameter
    pub fn validation(parameter: impl Into<String>) -> Self {
        Self::Validation {
            parameter: parameter.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a service error from a status code and raw body
    pub fn service(status: u16, error: Option<CloudError>, body: impl Into<String>) -> Self {
        Self::Service {
            status,
            error,
            body: body.into(),
        }
    }

    /// Create a canceled error for an explicit cancellation
    pub fn canceled() -> Self {
        Self::Canceled {
            reason: CancelReason::Requested,
        }
    }

    /// Create a canceled error for a transport timeout
    pub fn timed_out(timeout_ms: u64) -> Self {
        Self::Canceled {
            reason: CancelReason::TimedOut { timeout_ms },
        }
    }

    /// Create an unknown enum value error
    pub fn unknown_enum(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownEnumValue {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Whether the request never left the process because a parameter was missing
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether the call was canceled or timed out
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    /// Whether the body could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Json(_))
    }

    /// HTTP status of a service error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-supplied error payload, when one was decoded
    pub fn cloud_error(&self) -> Option<&CloudError> {
        match self {
            Self::Service { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias for paged-rest
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
