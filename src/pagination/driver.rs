//! Event-driven page delivery with early stop
//!
//! The progressive driver hands each page to a `ListOperationCallback` as it
//! arrives and asks whether to keep going. Every drive ends with exactly one
//! terminal callback: `success` with everything collected, or `failure`.

use super::types::{Page, PageFetcher, PagingBehavior};
use crate::error::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

// ============================================================================
// Callback
// ============================================================================

/// Consumer of a progressively delivered list operation
pub trait ListOperationCallback<T>: Send {
    /// Called with the items of each page as it arrives.
    ///
    /// The returned decision is ignored for the final page.
    fn on_page(&mut self, items: &[T]) -> PagingBehavior {
        let _ = items;
        PagingBehavior::Continue
    }

    /// Called once with every item delivered before the traversal ended
    fn success(&mut self, items: Vec<T>);

    /// Called once if any fetch failed or the call was canceled
    fn failure(&mut self, error: Error);
}

/// Callback that forwards pages to a closure and the outcome to a channel
pub struct ObserverCallback<T, P> {
    on_page: P,
    done: Option<oneshot::Sender<Result<Vec<T>>>>,
}

impl<T, P> ObserverCallback<T, P>
where
    T: Send,
    P: FnMut(&[T]) -> PagingBehavior + Send,
{
    /// Create the callback and the receiver for its terminal outcome
    pub fn new(on_page: P) -> (Self, oneshot::Receiver<Result<Vec<T>>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                on_page,
                done: Some(tx),
            },
            rx,
        )
    }

    fn finish(&mut self, outcome: Result<Vec<T>>) {
        if let Some(tx) = self.done.take() {
            // receiver may have been dropped; nobody is waiting then
            let _ = tx.send(outcome);
        }
    }
}

impl<T, P> ListOperationCallback<T> for ObserverCallback<T, P>
where
    T: Send,
    P: FnMut(&[T]) -> PagingBehavior + Send,
{
    fn on_page(&mut self, items: &[T]) -> PagingBehavior {
        (self.on_page)(items)
    }

    fn success(&mut self, items: Vec<T>) {
        self.finish(Ok(items));
    }

    fn failure(&mut self, error: Error) {
        self.finish(Err(error));
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Shared flag used to cancel an in-flight traversal
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    /// Create a token that has not been canceled
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check if cancellation was requested
    pub fn is_canceled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once cancellation is requested
    pub async fn canceled(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives as long as `self`, so this only returns on cancel
        let _ = rx.wait_for(|canceled| *canceled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a spawned list operation
#[derive(Debug)]
pub struct ServiceCall {
    cancel: CancelToken,
    task: JoinHandle<()>,
}

impl ServiceCall {
    /// Cancel the in-flight fetch; the callback receives a `Canceled` failure
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation was requested
    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }

    /// Check if the traversal has delivered its terminal callback
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Get a clone of the cancellation token
    pub fn token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait for the traversal to finish
    pub async fn join(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| Error::Other(format!("Paging task failed: {e}")))
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Drives a paginated call, delivering pages to a callback as they arrive
pub struct ProgressiveDriver<T> {
    fetcher: Arc<dyn PageFetcher<T>>,
    collected: Vec<T>,
    pages: usize,
}

impl<T: Send + 'static> ProgressiveDriver<T> {
    /// Create a driver using `fetcher` for continuation pages
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        Self {
            fetcher,
            collected: Vec::new(),
            pages: 0,
        }
    }

    /// Run the traversal to completion.
    ///
    /// `first` fetches the first page. Fetches are strictly sequential and
    /// each one races against `cancel`.
    pub async fn drive<F, C>(mut self, first: F, callback: &mut C, cancel: &CancelToken)
    where
        F: Future<Output = Result<Page<T>>> + Send,
        C: ListOperationCallback<T> + ?Sized,
    {
        let mut pending = until_canceled(first, cancel).await;

        loop {
            let page = match pending {
                Ok(page) => page,
                Err(e) => {
                    warn!("Paging failed after {} page(s): {e}", self.pages);
                    callback.failure(e);
                    return;
                }
            };

            self.pages += 1;
            let (items, next_link) = page.into_parts();
            let start = self.collected.len();
            self.collected.extend(items);
            let decision = callback.on_page(&self.collected[start..]);
            debug!(
                "Delivered page {} ({} item(s)), decision: {decision:?}",
                self.pages,
                self.collected.len() - start
            );

            match next_link {
                Some(link) if decision.should_continue() => {
                    pending = until_canceled(self.fetcher.fetch_next(&link), cancel).await;
                }
                Some(_) => {
                    info!("Paging stopped by consumer after {} page(s)", self.pages);
                    break;
                }
                None => break,
            }
        }

        callback.success(std::mem::take(&mut self.collected));
    }
}

async fn until_canceled<F, T>(fetch: F, cancel: &CancelToken) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_canceled() {
        return Err(Error::canceled());
    }
    tokio::select! {
        biased;
        () = cancel.canceled() => Err(Error::canceled()),
        result = fetch => result,
    }
}

/// Spawn a progressive traversal on the current tokio runtime.
///
/// Outside a runtime nothing is spawned: `callback` receives a
/// configuration failure and `None` is returned.
pub fn spawn<T, F, C>(fetcher: Arc<dyn PageFetcher<T>>, first: F, mut callback: C) -> Option<ServiceCall>
where
    T: Send + 'static,
    F: Future<Output = Result<Page<T>>> + Send + 'static,
    C: ListOperationCallback<T> + 'static,
{
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Cannot start paging: {e}");
            callback.failure(Error::config(format!(
                "Progressive listing requires a tokio runtime: {e}"
            )));
            return None;
        }
    };

    let cancel = CancelToken::new();
    let token = cancel.clone();
    let task = handle.spawn(async move {
        let mut callback = callback;
        ProgressiveDriver::new(fetcher)
            .drive(first, &mut callback, &token)
            .await;
    });
    Some(ServiceCall { cancel, task })
}
