//! Decoder implementations
//!
//! Turns raw responses into typed bodies and pages, and maps unexpected
//! status codes to service errors.

use super::types::{CloudError, ServiceResponse};
use crate::error::{Error, Result};
use crate::http::RawResponse;
use crate::pagination::Page;
use crate::types::OptionStringExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

// ============================================================================
// Body Decoding
// ============================================================================

/// Decode a JSON body into `T`
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON: {e}"),
    })
}

// ============================================================================
// Page Decoder
// ============================================================================

/// Decodes one page of a list response.
///
/// Field names are literal top-level keys, so `odata.nextLink` is looked up
/// as a single key rather than a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDecoder {
    items_field: String,
    next_link_field: String,
}

impl Default for PageDecoder {
    fn default() -> Self {
        Self::with_fields("value", "nextLink")
    }
}

impl PageDecoder {
    /// Create a decoder for the `value` / `nextLink` shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder for the `value` / `odata.nextLink` shape
    pub fn odata() -> Self {
        Self::with_fields("value", "odata.nextLink")
    }

    /// Create a decoder with custom field names
    pub fn with_fields(items_field: impl Into<String>, next_link_field: impl Into<String>) -> Self {
        Self {
            items_field: items_field.into(),
            next_link_field: next_link_field.into(),
        }
    }

    /// Decode a page from a response body
    pub fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<Page<T>> {
        let value: Value = decode_body(body)?;
        self.decode_value(value)
    }

    /// Decode a page from an already parsed JSON value
    pub fn decode_value<T: DeserializeOwned>(&self, value: Value) -> Result<Page<T>> {
        let Value::Object(mut map) = value else {
            return Err(Error::decode("Expected a JSON object for a page"));
        };

        let items = match map.remove(&self.items_field) {
            None | Some(Value::Null) => Vec::new(),
            Some(raw @ Value::Array(_)) => serde_json::from_value(raw).map_err(|e| {
                Error::decode(format!("Invalid item in '{}': {e}", self.items_field))
            })?,
            Some(_) => {
                return Err(Error::decode(format!(
                    "Field '{}' is not an array",
                    self.items_field
                )))
            }
        };

        let next_link = match map.remove(&self.next_link_field) {
            None | Some(Value::Null) => None,
            Some(Value::String(link)) => link.none_if_empty(),
            Some(_) => {
                return Err(Error::decode(format!(
                    "Field '{}' is not a string",
                    self.next_link_field
                )))
            }
        };

        Ok(Page::new(items, next_link))
    }
}

// ============================================================================
// Response Builder
// ============================================================================

/// Checks a raw response against the expected status codes and decodes it.
///
/// With no registered codes any 2xx status is accepted.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    expected: Vec<u16>,
    decoder: PageDecoder,
}

impl ResponseBuilder {
    /// Create a builder accepting any 2xx status
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a success status code
    #[must_use]
    pub fn register(mut self, status: u16) -> Self {
        self.expected.push(status);
        self
    }

    /// Use a custom page decoder for `build_page`
    #[must_use]
    pub fn with_decoder(mut self, decoder: PageDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Check if a status code counts as success
    pub fn is_expected(&self, status: u16) -> bool {
        if self.expected.is_empty() {
            (200..300).contains(&status)
        } else {
            self.expected.contains(&status)
        }
    }

    /// Decode a single resource body
    pub fn build<T: DeserializeOwned>(&self, raw: RawResponse) -> Result<ServiceResponse<T>> {
        self.check_status(&raw)?;
        let body = decode_body(&raw.body)?;
        Ok(ServiceResponse::new(body, raw.status, raw.headers))
    }

    /// Decode a page of a list response
    pub fn build_page<T: DeserializeOwned>(
        &self,
        raw: RawResponse,
    ) -> Result<ServiceResponse<Page<T>>> {
        self.check_status(&raw)?;
        let page = self.decoder.decode(&raw.body)?;
        Ok(ServiceResponse::new(page, raw.status, raw.headers))
    }

    fn check_status(&self, raw: &RawResponse) -> Result<()> {
        if self.is_expected(raw.status) {
            return Ok(());
        }
        let error = CloudError::from_body(&raw.body);
        warn!(
            "Unexpected status {} ({})",
            raw.status,
            error.as_ref().map_or("no error payload", |e| e.code.as_str())
        );
        Err(Error::service(raw.status, error, raw.body.clone()))
    }
}
