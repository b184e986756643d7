// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # paged-rest
//!
//! Client runtime for a paginated REST management API, plus the preview
//! features operation group built on top of it.
//!
//! ## Features
//!
//! - **Lazy paging**: `PagedList` fetches continuation pages only when the
//!   buffered items run out
//! - **Progressive delivery**: a `ListOperationCallback` sees each page as it
//!   arrives and may stop the traversal early
//! - **Cancellation**: every background listing returns a `ServiceCall`
//!   handle that cancels the in-flight fetch
//! - **String enums**: fixed and expandable wire enumerations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paged_rest::{ClientConfig, FeaturesClient, ServiceClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> paged_rest::Result<()> {
//!     let config = ClientConfig::builder().subscription_id("my-sub").build();
//!     let features = FeaturesClient::new(Arc::new(ServiceClient::new(config)?));
//!
//!     let list = features.list("Microsoft.Compute").await?.into_body();
//!     for feature in list.collect_all().await? {
//!         println!("{:?} {:?}", feature.name, feature.state());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   FeaturesClient                          │
//! │  list_all / list / get / register / *_next / *_async      │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴───┬──────────────┬───────────┐
//! │  Validate    │   Pagination    │   Decode     │  Models   │
//! ├──────────────┼─────────────────┼──────────────┼───────────┤
//! │ required()   │ PagedList       │ PageDecoder  │ Feature   │
//! │              │ Progressive     │ Response     │ Enums     │
//! │              │ ServiceCall     │ CloudError   │ Entity    │
//! └──────────────┴─────────────────┴──────────────┴───────────┘
//!                              │
//!                    ServiceClient (reqwest)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Required-parameter validation
pub mod validate;

/// HTTP client
pub mod http;

/// Response decoding and service errors
pub mod decode;

/// Paged lists and progressive page delivery
pub mod pagination;

/// Wire models and string enumerations
pub mod models;

/// Preview features operations
pub mod features;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, ClientConfig};
pub use decode::{CloudError, ServiceResponse};
pub use features::FeaturesClient;
pub use http::ServiceClient;
pub use pagination::{
    ListOperationCallback, ObserverCallback, Page, PagedList, PagingBehavior, ServiceCall,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
