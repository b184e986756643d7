//! HTTP client module
//!
//! Provides the transport that every operation sends its requests through.
//!
//! # Features
//!
//! - **Common Headers**: content type, `accept-language`, `User-Agent`, and
//!   configured defaults on every request
//! - **URL Building**: percent-encoded path segments and next-link resolution
//! - **Error Classification**: timeouts become `Canceled`, everything else
//!   from the wire becomes `Transport`

mod client;

pub use client::{RawResponse, RequestConfig, ServiceClient, CONTENT_TYPE};
