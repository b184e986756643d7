//! Tests for the features operations

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::ServiceClient;
use crate::models::{FeatureResult, FeatureState};
use crate::pagination::{ObserverCallback, PagingBehavior};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEATURES_PATH: &str = "/subscriptions/sub-1/providers/Microsoft.Features/features";
const COMPUTE_PATH: &str =
    "/subscriptions/sub-1/providers/Microsoft.Features/providers/Microsoft.Compute/features";

fn features_for(server: &MockServer) -> FeaturesClient {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .subscription_id("sub-1")
        .build();
    FeaturesClient::new(Arc::new(ServiceClient::new(config).unwrap()))
}

fn feature(name: &str, state: &str) -> serde_json::Value {
    json!({
        "name": name,
        "properties": {"state": state},
        "type": "Microsoft.Features/providers/features"
    })
}

fn names(features: &[FeatureResult]) -> Vec<String> {
    features
        .iter()
        .filter_map(|f| f.name.clone())
        .collect()
}

async fn assert_no_requests(server: &MockServer) {
    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty(), "unexpected requests: {received:?}");
}

/// Mount a two-page `list_all` listing; page two lives at `/next`
async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FEATURES_PATH))
        .and(query_param("api-version", "2015-12-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("A/one", "Registered"), feature("A/two", "NotRegistered")],
            "nextLink": format!("{}/next?$skiptoken=2", server.uri())
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .and(query_param("$skiptoken", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("B/three", "Registering")]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// List All
// ============================================================================

#[tokio::test]
async fn test_list_all_follows_next_links() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let response = features_for(&server).list_all().await.unwrap();
    assert_eq!(response.status(), 200);

    let list = response.into_body();
    assert!(list.has_next_page());
    assert_eq!(list.pages_loaded(), 1);

    let all = list.collect_all().await.unwrap();
    assert_eq!(names(&all), vec!["A/one", "A/two", "B/three"]);
    assert_eq!(all[2].state(), Some(&FeatureState::Registering));
}

#[tokio::test]
async fn test_list_all_is_lazy() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut list = features_for(&server).list_all().await.unwrap().into_body();
    let first = list.next_item().await.unwrap().unwrap();
    assert_eq!(first.name.as_deref(), Some("A/one"));

    // the second page has not been requested yet
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_list_all_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEATURES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("A/one", "Registered")],
            "nextLink": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = features_for(&server).list_all().await.unwrap().into_body();
    assert!(!list.has_next_page());
    assert_eq!(names(&list.collect_all().await.unwrap()), vec!["A/one"]);
}

#[tokio::test]
async fn test_list_all_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEATURES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": "AuthorizationFailed", "message": "denied"}
        })))
        .mount(&server)
        .await;

    let err = features_for(&server).list_all().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.cloud_error().unwrap().code, "AuthorizationFailed");
}

#[tokio::test]
async fn test_list_all_requires_subscription_without_sending() {
    let server = MockServer::start().await;
    let config = ClientConfig::builder().base_url(server.uri()).build();
    let features = FeaturesClient::new(Arc::new(ServiceClient::new(config).unwrap()));

    let err = features.list_all().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter subscriptionId is required and cannot be null."
    );
    assert_no_requests(&server).await;
}

#[tokio::test]
async fn test_list_all_requires_api_version() {
    let server = MockServer::start().await;
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .subscription_id("sub-1")
        .no_api_version()
        .build();
    let features = FeaturesClient::new(Arc::new(ServiceClient::new(config).unwrap()));

    let err = features.list_all().await.unwrap_err();
    assert!(matches!(err, Error::Validation { ref parameter } if parameter == "apiVersion"));
    assert_no_requests(&server).await;
}

// ============================================================================
// Next Page Operations
// ============================================================================

#[tokio::test]
async fn test_list_all_next_sends_link_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .and(query_param("$skiptoken", "abc"))
        .and(header("accept-language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("C/one", "Unregistered")],
            "nextLink": "https://management.example.com/next?$skiptoken=def"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let features = features_for(&server);
    let page = features
        .list_all_next(&format!("{}/next?$skiptoken=abc", server.uri()))
        .await
        .unwrap();

    assert_eq!(names(page.items()), vec!["C/one"]);
    assert_eq!(
        page.next_link(),
        Some("https://management.example.com/next?$skiptoken=def")
    );

    let received = server.received_requests().await.unwrap();
    let query = received[0].url.query().unwrap_or_default();
    assert!(!query.contains("api-version"));
}

#[tokio::test]
async fn test_next_operations_reject_blank_links() {
    let server = MockServer::start().await;
    let features = features_for(&server);

    let err = features.list_all_next("").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter nextPageLink is required and cannot be null."
    );
    assert!(features.list_next("  ").await.unwrap_err().is_validation());
    assert_no_requests(&server).await;
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_by_namespace() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COMPUTE_PATH))
        .and(query_param("api-version", "2015-12-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("Microsoft.Compute/AllowPreview", "Registered")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = features_for(&server)
        .list("Microsoft.Compute")
        .await
        .unwrap()
        .into_body();
    let all = list.collect_all().await.unwrap();
    assert_eq!(names(&all), vec!["Microsoft.Compute/AllowPreview"]);
    assert!(all[0].is_registered());
}

#[tokio::test]
async fn test_list_requires_namespace() {
    let server = MockServer::start().await;

    let err = features_for(&server).list("").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter resourceProviderNamespace is required and cannot be null."
    );
    assert_no_requests(&server).await;
}

// ============================================================================
// Get / Register
// ============================================================================

#[tokio::test]
async fn test_get_feature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{COMPUTE_PATH}/AllowPreview")))
        .and(query_param("api-version", "2015-12-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-id", "req-42")
                .set_body_json(feature("Microsoft.Compute/AllowPreview", "NotRegistered")),
        )
        .mount(&server)
        .await;

    let response = features_for(&server)
        .get("Microsoft.Compute", "AllowPreview")
        .await
        .unwrap();

    assert_eq!(response.request_id(), Some("req-42"));
    assert_eq!(response.body().state(), Some(&FeatureState::NotRegistered));
}

#[tokio::test]
async fn test_get_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{COMPUTE_PATH}/Missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "FeatureNotFound", "message": "no such feature"}
        })))
        .mount(&server)
        .await;

    let err = features_for(&server)
        .get("Microsoft.Compute", "Missing")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.cloud_error().unwrap().message, "no such feature");
}

#[tokio::test]
async fn test_get_requires_feature_name() {
    let server = MockServer::start().await;

    let err = features_for(&server)
        .get("Microsoft.Compute", "")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref parameter } if parameter == "featureName"));
    assert_no_requests(&server).await;
}

#[tokio::test]
async fn test_register_feature_posts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPUTE_PATH}/AllowPreview/register")))
        .and(query_param("api-version", "2015-12-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(feature("Microsoft.Compute/AllowPreview", "Registering")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = features_for(&server)
        .register("Microsoft.Compute", "AllowPreview")
        .await
        .unwrap();
    assert_eq!(response.body().state(), Some(&FeatureState::Registering));
}

// ============================================================================
// Progressive Variants
// ============================================================================

#[tokio::test]
async fn test_list_all_async_delivers_every_page() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let (callback, done) = ObserverCallback::new(|items: &[FeatureResult]| {
        assert!(!items.is_empty());
        PagingBehavior::Continue
    });

    let call = features_for(&server).list_all_async(callback).unwrap();
    let all = done.await.unwrap().unwrap();
    call.join().await.unwrap();

    assert_eq!(names(&all), vec!["A/one", "A/two", "B/three"]);
}

#[tokio::test]
async fn test_list_all_async_stop_after_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEATURES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("A/one", "Registered")],
            "nextLink": format!("{}/next", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(0)
        .mount(&server)
        .await;

    let (callback, done) = ObserverCallback::new(|_: &[FeatureResult]| PagingBehavior::Stop);
    let call = features_for(&server).list_all_async(callback).unwrap();

    let all = done.await.unwrap().unwrap();
    call.join().await.unwrap();
    assert_eq!(names(&all), vec!["A/one"]);
}

#[tokio::test]
async fn test_list_async_reports_failure_on_later_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COMPUTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [feature("Microsoft.Compute/One", "Registered")],
            "nextLink": format!("{}/broken", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let (callback, done) =
        ObserverCallback::new(|_: &[FeatureResult]| PagingBehavior::Continue);
    let call = features_for(&server)
        .list_async("Microsoft.Compute", callback)
        .unwrap();

    let err = done.await.unwrap().unwrap_err();
    call.join().await.unwrap();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_list_async_validation_failure_returns_none() {
    let server = MockServer::start().await;

    let (callback, done) =
        ObserverCallback::new(|_: &[FeatureResult]| PagingBehavior::Continue);
    let call = features_for(&server).list_async(" ", callback);

    assert!(call.is_none());
    let err = done.await.unwrap().unwrap_err();
    assert!(err.is_validation());
    assert_no_requests(&server).await;
}

#[test]
fn test_async_variants_without_runtime_report_failure() {
    let config = ClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .subscription_id("sub-1")
        .build();
    let features = FeaturesClient::new(Arc::new(ServiceClient::new(config).unwrap()));

    let (callback, done) = ObserverCallback::new(|_: &[FeatureResult]| PagingBehavior::Continue);
    assert!(features.list_all_async(callback).is_none());
    let err = done.blocking_recv().unwrap().unwrap_err();
    assert!(matches!(err, Error::Config { .. }));

    let (callback, done) = ObserverCallback::new(|_: &[FeatureResult]| PagingBehavior::Continue);
    assert!(features.list_async("Microsoft.Compute", callback).is_none());
    let err = done.blocking_recv().unwrap().unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
