//! Pagination module
//!
//! Supports: pull-based traversal (async, stream, blocking) and
//! progressive callback delivery with early stop.
//!
//! # Overview
//!
//! Every list operation returns its first page plus a continuation link.
//! `PagedList` turns that into one lazy, ordered sequence of items, fetching
//! the next page only when the buffered items run out. `ProgressiveDriver`
//! instead pushes pages to a `ListOperationCallback`, which may stop the
//! traversal after any page.

mod driver;
mod fetchers;
mod paged_list;
mod types;

pub use driver::{
    spawn, CancelToken, ListOperationCallback, ObserverCallback, ProgressiveDriver, ServiceCall,
};
pub use fetchers::{FnFetcher, NextLinkFetcher};
pub use paged_list::{BlockingPages, PagedList};
pub use types::{Page, PageFetcher, PagingBehavior};
