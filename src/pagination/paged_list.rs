//! Lazy, forward-only traversal over every page of a result set
//!
//! A `PagedList` starts from an already fetched first page and pulls
//! continuation pages one at a time, only when the buffered items run out.

use super::types::{Page, PageFetcher};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, warn};

/// Flat view over all items of a paginated result set.
///
/// Items come out in server order, page by page. Every advancing method takes
/// `&mut self`, so a single list never has more than one fetch in flight.
/// Once the last page has been drained (or a fetch failed) the list is
/// exhausted for good; call the originating list operation again to restart.
pub struct PagedList<T> {
    /// Unconsumed items of the pages loaded so far
    items: VecDeque<T>,
    /// Link to the page after the last loaded one
    next_link: Option<String>,
    fetcher: Arc<dyn PageFetcher<T>>,
    pages_loaded: usize,
}

impl<T: Send + 'static> PagedList<T> {
    /// Create a list from the first page and the fetcher for the rest
    pub fn new(first: Page<T>, fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        let (items, next_link) = first.into_parts();
        Self {
            items: items.into(),
            next_link,
            fetcher,
            pages_loaded: 1,
        }
    }

    /// Check if the server reported more pages
    pub fn has_next_page(&self) -> bool {
        self.next_link.is_some()
    }

    /// Link to the next page, if any
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Items loaded but not yet consumed
    pub fn current_page_items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Number of pages fetched so far, including the first
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Check if no items remain and no page is left to fetch
    pub fn is_exhausted(&self) -> bool {
        self.items.is_empty() && self.next_link.is_none()
    }

    /// Fetch the next page and append its items to the buffer.
    ///
    /// Returns `Ok(false)` when there is no next page. On error the list keeps
    /// its buffered items but will not fetch again.
    pub async fn load_next_page(&mut self) -> Result<bool> {
        let Some(link) = self.next_link.clone() else {
            return Ok(false);
        };

        match self.fetcher.fetch_next(&link).await {
            Ok(page) => {
                self.absorb(page);
                Ok(true)
            }
            Err(e) => {
                warn!("Paging aborted after {} page(s): {e}", self.pages_loaded);
                self.next_link = None;
                Err(e)
            }
        }
    }

    /// Produce the next item, fetching a page if the buffer is empty.
    ///
    /// A fetch error is returned in place of the item that needed the page;
    /// after that the list yields `None`.
    pub async fn next_item(&mut self) -> Option<Result<T>> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return Some(Ok(item));
            }
            self.next_link.as_ref()?;
            if let Err(e) = self.load_next_page().await {
                return Some(Err(e));
            }
        }
    }

    /// Drain every remaining item into a vector
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::with_capacity(self.items.len());
        while let Some(item) = self.next_item().await {
            all.push(item?);
        }
        debug!(
            "Collected {} item(s) over {} page(s)",
            all.len(),
            self.pages_loaded
        );
        Ok(all)
    }

    /// Convert into a `Stream` of items
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send {
        stream::unfold(self, |mut list| async move {
            list.next_item().await.map(|item| (item, list))
        })
    }

    /// Convert into a blocking iterator driven by the given runtime.
    ///
    /// Each page fetch blocks the calling thread, so the iterator must not be
    /// advanced from inside an async task. The handle must belong to a
    /// multi-thread runtime: `Handle::block_on` cannot drive I/O on a
    /// current-thread runtime, so such a handle is rejected up front.
    pub fn blocking(self, handle: Handle) -> Result<BlockingPages<T>> {
        if matches!(handle.runtime_flavor(), RuntimeFlavor::CurrentThread) {
            return Err(Error::config(
                "Blocking iteration requires a multi-thread tokio runtime",
            ));
        }
        Ok(BlockingPages { list: self, handle })
    }

    fn absorb(&mut self, page: Page<T>) {
        let (items, next_link) = page.into_parts();
        self.pages_loaded += 1;
        debug!(
            "Loaded page {} with {} item(s), more: {}",
            self.pages_loaded,
            items.len(),
            next_link.is_some()
        );
        self.items.extend(items);
        self.next_link = next_link;
    }
}

impl<T> std::fmt::Debug for PagedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedList")
            .field("buffered", &self.items.len())
            .field("next_link", &self.next_link)
            .field("pages_loaded", &self.pages_loaded)
            .finish_non_exhaustive()
    }
}

/// Blocking iterator over a `PagedList`
pub struct BlockingPages<T> {
    list: PagedList<T>,
    handle: Handle,
}

impl<T> std::fmt::Debug for BlockingPages<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingPages")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> BlockingPages<T> {
    /// Get the underlying list
    pub fn into_inner(self) -> PagedList<T> {
        self.list
    }
}

impl<T: Send + 'static> Iterator for BlockingPages<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.list.items.pop_front() {
            return Some(Ok(item));
        }
        self.handle.block_on(self.list.next_item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.list.items.len();
        if self.list.next_link.is_some() {
            (buffered, None)
        } else {
            (buffered, Some(buffered))
        }
    }
}
