//! Features operations
//!
//! List, get, and register preview features of a subscription. Every list
//! operation comes in two forms: a pull-based `PagedList` and a progressive
//! callback variant that runs on a spawned task.

use crate::decode::{ResponseBuilder, ServiceResponse};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::models::FeatureResult;
use crate::pagination::{
    spawn, ListOperationCallback, NextLinkFetcher, Page, PageFetcher, PagedList, ServiceCall,
};
use crate::types::Method;
use crate::validate;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const PROVIDER: &str = "Microsoft.Features";

/// Access to the operations of the features API
#[derive(Debug, Clone)]
pub struct FeaturesClient {
    client: Arc<ServiceClient>,
}

/// Validated first-page request, ready to send
struct ListRequest {
    url: Url,
    api_version: String,
}

impl FeaturesClient {
    /// Create an operations client sharing `client`
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Get the underlying service client
    pub fn service_client(&self) -> &Arc<ServiceClient> {
        &self.client
    }

    // ========================================================================
    // List All
    // ========================================================================

    /// List every preview feature available to the subscription
    pub async fn list_all(&self) -> Result<ServiceResponse<PagedList<FeatureResult>>> {
        let request = self.list_all_request()?;
        let response = self.first_page(request).await?;
        Ok(response.map(|page| PagedList::new(page, self.fetcher())))
    }

    /// List every preview feature, delivering pages to `callback`.
    ///
    /// Runs on the current tokio runtime. Returns `None` when validation
    /// failed or no runtime is available; `callback` has then already
    /// received the failure and nothing was sent.
    pub fn list_all_async<C>(&self, mut callback: C) -> Option<ServiceCall>
    where
        C: ListOperationCallback<FeatureResult> + 'static,
    {
        match self.list_all_request() {
            Ok(request) => self.spawn_list(request, callback),
            Err(e) => {
                callback.failure(e);
                None
            }
        }
    }

    /// Fetch the page behind a `list_all` next link
    pub async fn list_all_next(&self, next_page_link: &str) -> Result<Page<FeatureResult>> {
        self.fetcher().fetch_next(next_page_link).await
    }

    fn list_all_request(&self) -> Result<ListRequest> {
        let subscription_id = validate::required("subscriptionId", self.client.subscription_id())?;
        let api_version = validate::required("apiVersion", self.client.api_version())?;
        let url = self
            .client
            .url_for(&["subscriptions", subscription_id, "providers", PROVIDER, "features"])?;
        Ok(ListRequest {
            url,
            api_version: api_version.to_string(),
        })
    }

    // ========================================================================
    // List
    // ========================================================================

    /// List the preview features of one resource provider namespace
    pub async fn list(
        &self,
        resource_provider_namespace: &str,
    ) -> Result<ServiceResponse<PagedList<FeatureResult>>> {
        let request = self.list_request(resource_provider_namespace)?;
        let response = self.first_page(request).await?;
        Ok(response.map(|page| PagedList::new(page, self.fetcher())))
    }

    /// List the features of a namespace, delivering pages to `callback`.
    ///
    /// Runs on the current tokio runtime. Returns `None` when validation
    /// failed or no runtime is available; `callback` has then already
    /// received the failure and nothing was sent.
    pub fn list_async<C>(&self, resource_provider_namespace: &str, mut callback: C) -> Option<ServiceCall>
    where
        C: ListOperationCallback<FeatureResult> + 'static,
    {
        match self.list_request(resource_provider_namespace) {
            Ok(request) => self.spawn_list(request, callback),
            Err(e) => {
                callback.failure(e);
                None
            }
        }
    }

    /// Fetch the page behind a `list` next link
    pub async fn list_next(&self, next_page_link: &str) -> Result<Page<FeatureResult>> {
        self.fetcher().fetch_next(next_page_link).await
    }

    fn list_request(&self, resource_provider_namespace: &str) -> Result<ListRequest> {
        let namespace =
            validate::required("resourceProviderNamespace", Some(resource_provider_namespace))?;
        let subscription_id = validate::required("subscriptionId", self.client.subscription_id())?;
        let api_version = validate::required("apiVersion", self.client.api_version())?;
        let url = self.client.url_for(&[
            "subscriptions",
            subscription_id,
            "providers",
            PROVIDER,
            "providers",
            namespace,
            "features",
        ])?;
        Ok(ListRequest {
            url,
            api_version: api_version.to_string(),
        })
    }

    // ========================================================================
    // Get / Register
    // ========================================================================

    /// Get one preview feature
    pub async fn get(
        &self,
        resource_provider_namespace: &str,
        feature_name: &str,
    ) -> Result<ServiceResponse<FeatureResult>> {
        let (url, api_version) = self.feature_url(resource_provider_namespace, feature_name, None)?;
        let raw = self
            .client
            .send(Method::GET, url, api_version_query(&api_version))
            .await?;
        ResponseBuilder::new().register(200).build(raw)
    }

    /// Register a preview feature for the subscription
    pub async fn register(
        &self,
        resource_provider_namespace: &str,
        feature_name: &str,
    ) -> Result<ServiceResponse<FeatureResult>> {
        let (url, api_version) =
            self.feature_url(resource_provider_namespace, feature_name, Some("register"))?;
        debug!("Registering feature {resource_provider_namespace}/{feature_name}");
        let raw = self
            .client
            .send(Method::POST, url, api_version_query(&api_version))
            .await?;
        ResponseBuilder::new().register(200).build(raw)
    }

    fn feature_url(
        &self,
        resource_provider_namespace: &str,
        feature_name: &str,
        action: Option<&str>,
    ) -> Result<(Url, String)> {
        let namespace =
            validate::required("resourceProviderNamespace", Some(resource_provider_namespace))?;
        let feature_name = validate::required("featureName", Some(feature_name))?;
        let subscription_id = validate::required("subscriptionId", self.client.subscription_id())?;
        let api_version = validate::required("apiVersion", self.client.api_version())?;

        let mut segments = vec![
            "subscriptions",
            subscription_id,
            "providers",
            PROVIDER,
            "providers",
            namespace,
            "features",
            feature_name,
        ];
        segments.extend(action);
        Ok((self.client.url_for(&segments)?, api_version.to_string()))
    }

    // ========================================================================
    // Shared plumbing
    // ========================================================================

    fn fetcher(&self) -> Arc<dyn PageFetcher<FeatureResult>> {
        Arc::new(NextLinkFetcher::new(self.client.clone()))
    }

    async fn first_page(&self, request: ListRequest) -> Result<ServiceResponse<Page<FeatureResult>>> {
        fetch_first_page(&self.client, request).await
    }

    fn spawn_list<C>(&self, request: ListRequest, callback: C) -> Option<ServiceCall>
    where
        C: ListOperationCallback<FeatureResult> + 'static,
    {
        let client = self.client.clone();
        let first = async move {
            fetch_first_page(&client, request)
                .await
                .map(ServiceResponse::into_body)
        };
        spawn(self.fetcher(), first, callback)
    }
}

async fn fetch_first_page(
    client: &ServiceClient,
    request: ListRequest,
) -> Result<ServiceResponse<Page<FeatureResult>>> {
    let raw = client
        .send(Method::GET, request.url, api_version_query(&request.api_version))
        .await?;
    ResponseBuilder::new().register(200).build_page(raw)
}

fn api_version_query(api_version: &str) -> RequestConfig {
    RequestConfig::new().query("api-version", api_version)
}
