//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by every list operation.

use crate::error::Result;
use crate::types::OptionStringExt;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// One server response's worth of items plus an optional continuation link.
///
/// A page without a next link is the last page of its result set. The wire
/// shape is `{"value": [...], "nextLink": "..."}`; an empty `nextLink` is
/// treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "value", default)]
    items: Vec<T>,
    #[serde(
        rename = "nextLink",
        default,
        deserialize_with = "deserialize_next_link",
        skip_serializing_if = "Option::is_none"
    )]
    next_link: Option<String>,
}

impl<T> Page<T> {
    /// Create a page from its items and continuation link
    pub fn new(items: Vec<T>, next_link: Option<String>) -> Self {
        Self {
            items,
            next_link: next_link.none_if_empty(),
        }
    }

    /// Create the final page of a result set
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_link: None,
        }
    }

    /// Items in server order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Continuation link, if more pages exist
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next_link.is_none()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into items and continuation link
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next_link)
    }
}

fn deserialize_next_link<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let link: Option<String> = Option::deserialize(deserializer)?;
    Ok(link.none_if_empty())
}

/// Consumer decision after each delivered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagingBehavior {
    /// Fetch the next page if there is one
    #[default]
    Continue,
    /// Stop here and report what has been collected
    Stop,
}

impl PagingBehavior {
    /// Check if we should continue
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if we should stop
    pub fn should_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Performs one round trip for a continuation page.
///
/// First pages are fetched by the operation that knows the request's path and
/// query parameters; continuation fetches only need the link the server
/// handed back.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch the page behind `next_link`
    async fn fetch_next(&self, next_link: &str) -> Result<Page<T>>;
}
