//! Tests for the photo API module

use super::*;
use crate::auth::StaticCredential;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::PageFetcher;
use crate::types::PhotoId;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> PhotoApi {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    let http = HttpClient::new(config, Arc::new(StaticCredential::new("tok"))).unwrap();
    PhotoApi::new(Arc::new(http))
}

#[test]
fn test_page_body_shapes() {
    let bare: PageBody = serde_json::from_value(json!([{"id": 1}])).unwrap();
    assert_eq!(bare.into_items().len(), 1);

    let items: PageBody = serde_json::from_value(json!({"items": [{"id": 1}, {"id": 2}]})).unwrap();
    assert_eq!(items.into_items().len(), 2);

    let photos: PageBody = serde_json::from_value(json!({"photos": []})).unwrap();
    assert!(photos.into_items().is_empty());
}

#[tokio::test]
async fn test_listing_paths() {
    let server = MockServer::start().await;
    let api = api_for(&server);

    assert_eq!(api.listing_path(&ListingScope::All).unwrap(), "/photos");
    assert_eq!(
        api.listing_path(&ListingScope::Person("ann lee".into()))
            .unwrap(),
        "/people/ann%20lee/photos"
    );
}

#[tokio::test]
async fn test_person_path_without_placeholder_rejected() {
    let server = MockServer::start().await;
    let http = HttpClient::new(
        HttpClientConfig::builder().base_url(server.uri()).build(),
        Arc::new(StaticCredential::new("tok")),
    )
    .unwrap();
    let api = PhotoApi::with_paths(Arc::new(http), "/photos", "/people/photos");

    let err = api
        .listing_path(&ListingScope::Person("7".into()))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[tokio::test]
async fn test_fetch_main_listing_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("offset", "10"))
        .and(query_param("limit", "2"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "filename": "a.jpg", "thumbnail_url": "/m/11/t", "url": "/m/11"},
            {"id": 12, "filename": "b.jpg", "thumbnail_url": "/m/12/t", "url": "/m/12"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = api_for(&server).listing(ListingScope::All);
    let photos = fetcher.fetch_page(10, 2).await.unwrap();

    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].id, PhotoId::new("11"));
    assert_eq!(photos[1].filename, "b.jpg");
}

#[tokio::test]
async fn test_fetch_person_listing_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/42/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "x1", "filename": "x.jpg"}]
        })))
        .mount(&server)
        .await;

    let fetcher = api_for(&server).listing(ListingScope::Person("42".into()));
    assert_eq!(fetcher.scope(), &ListingScope::Person("42".into()));

    let photos = fetcher.fetch_page(0, 50).await.unwrap();
    assert_eq!(photos[0].id, PhotoId::new("x1"));
}

#[tokio::test]
async fn test_fetch_failure_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .fetch_page(&ListingScope::All, 0, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RequestFailed { status: 500, .. }));
}
