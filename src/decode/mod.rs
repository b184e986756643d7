//! Response decoder module
//!
//! Supports: single JSON resources and paged list responses
//!
//! # Overview
//!
//! Decoders turn a raw response into a typed `ServiceResponse`. Status codes
//! outside the registered set become `Error::Service` carrying the decoded
//! `CloudError` payload when the body has one.

mod decoders;
mod types;

pub use decoders::{decode_body, PageDecoder, ResponseBuilder};
pub use types::{CloudError, ServiceResponse};
