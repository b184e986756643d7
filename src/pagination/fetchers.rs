//! Page fetcher implementations
//!
//! `NextLinkFetcher` follows server-issued next links over HTTP and serves
//! every list operation. `FnFetcher` wraps a closure for transports that are
//! not plain HTTP (and for tests).

use super::types::{Page, PageFetcher};
use crate::decode::{PageDecoder, ResponseBuilder};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::types::Method;
use crate::validate;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Next Link Fetcher
// ============================================================================

/// Fetches continuation pages by issuing `GET {nextLink}`.
///
/// Continuation requests carry no query parameters of their own; the link
/// already encodes them.
pub struct NextLinkFetcher<T> {
    client: Arc<ServiceClient>,
    decoder: PageDecoder,
    _item: PhantomData<fn() -> T>,
}

impl<T> NextLinkFetcher<T> {
    /// Create a fetcher using the default `value` / `nextLink` page shape
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self::with_decoder(client, PageDecoder::default())
    }

    /// Create a fetcher with a custom page decoder
    pub fn with_decoder(client: Arc<ServiceClient>, decoder: PageDecoder) -> Self {
        Self {
            client,
            decoder,
            _item: PhantomData,
        }
    }
}

impl<T> Clone for NextLinkFetcher<T> {
    fn clone(&self) -> Self {
        Self::with_decoder(self.client.clone(), self.decoder.clone())
    }
}

impl<T> std::fmt::Debug for NextLinkFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NextLinkFetcher")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> PageFetcher<T> for NextLinkFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_next(&self, next_link: &str) -> Result<Page<T>> {
        let next_link = validate::required("nextPageLink", Some(next_link))?;
        let url = self.client.resolve(next_link)?;
        debug!("Fetching next page: {url}");

        let raw = self
            .client
            .send(Method::GET, url, RequestConfig::new())
            .await?;

        ResponseBuilder::new()
            .register(200)
            .with_decoder(self.decoder.clone())
            .build_page(raw)
            .map(|response| response.into_body())
    }
}

// ============================================================================
// Closure Fetcher
// ============================================================================

/// Page fetcher backed by a `Fn(next_link) -> Future` closure
#[derive(Clone)]
pub struct FnFetcher<F> {
    fetch: F,
}

impl<F> FnFetcher<F> {
    /// Wrap a closure as a page fetcher
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<T, F, Fut> PageFetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send,
{
    async fn fetch_next(&self, next_link: &str) -> Result<Page<T>> {
        (self.fetch)(next_link.to_string()).await
    }
}
