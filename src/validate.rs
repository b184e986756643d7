//! Required-parameter checks
//!
//! Every operation validates its path and query parameters before building a
//! request, so a missing identifier never reaches the network.

use crate::error::{Error, Result};

/// Return the value of a required parameter or a validation error.
///
/// Blank strings count as absent.
pub fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::validation(name)),
    }
}
