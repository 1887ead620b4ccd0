use mockito::{Matcher, Server};
use serde_json::json;

use super::registry;
use crate::config::Config;
use crate::oembed::{HttpTransport, OembedError, OembedFetcher, Transmission, Transport, TransportError};

const TARGET: &str = "https://example.com/x";
const PARAMS: [(&str, &str); 2] = [("url", TARGET), ("format", "json")];

fn transport() -> HttpTransport {
    HttpTransport::new(&Config::default()).unwrap()
}

fn query_params() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("url".into(), TARGET.into()),
        Matcher::UrlEncoded("format".into(), "json".into()),
    ])
}

fn form_body() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::Regex(r"url=https%3A%2F%2Fexample\.com%2Fx".into()),
        Matcher::Regex("format=json".into()),
    ])
}

#[tokio::test]
async fn test_query_transmission() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/oembed")
        .match_query(query_params())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "link", "title": "X"}"#)
        .create_async()
        .await;

    let endpoint = format!("{}/oembed", server.url());
    let value = transport()
        .fetch_page(&endpoint, &PARAMS, Transmission::Query)
        .await
        .unwrap();

    assert_eq!(value["title"], "X");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_body_transmission() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/oembed")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(form_body())
        .with_status(200)
        .with_body(r#"{"type": "photo"}"#)
        .create_async()
        .await;

    let endpoint = format!("{}/oembed", server.url());
    let value = transport()
        .fetch_page(&endpoint, &PARAMS, Transmission::Body)
        .await
        .unwrap();

    assert_eq!(value, json!({"type": "photo"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/oembed")
        .match_query(query_params())
        .with_status(404)
        .with_body(r#"{"error": "not found"}"#)
        .create_async()
        .await;

    let endpoint = format!("{}/oembed", server.url());
    let err = transport()
        .fetch_page(&endpoint, &PARAMS, Transmission::Query)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 404, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unparsable_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/oembed")
        .match_query(query_params())
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let endpoint = format!("{}/oembed", server.url());
    let err = transport()
        .fetch_page(&endpoint, &PARAMS, Transmission::Query)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Reqwest(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_direct_match_over_http_falls_back_to_post() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/oembed")
        .match_query(query_params())
        .with_status(405)
        .expect(1)
        .create_async()
        .await;
    let post = server
        .mock("POST", "/oembed")
        .match_body(form_body())
        .with_status(200)
        .with_body(r#"{"type": "video", "provider_name": "Example"}"#)
        .expect(1)
        .create_async()
        .await;

    let registry = registry(json!([
        {"name": "Example", "endpoints": [
            {"url": format!("{}/oembed", server.url()), "schemes": ["https://example.com/*"]}
        ]}
    ]));
    let fetcher = OembedFetcher::new(registry, transport());

    let data = fetcher.fetch_oembed_data(TARGET).await.unwrap();

    assert_eq!(data.provider_name(), Some("Example"));
    get.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn test_discovery_over_http() {
    let mut server = Server::new_async().await;
    // "b" has no mocks: every request to it fails
    let a = server
        .mock("GET", "/a")
        .match_query(query_params())
        .with_status(200)
        .with_body(r#"{"type": "link", "title": "from a"}"#)
        .expect(1)
        .create_async()
        .await;

    let registry = registry(json!([
        {"name": "A", "endpoints": [{"url": format!("{}/a", server.url()), "discovery": true}]},
        {"name": "B", "endpoints": [{"url": format!("{}/b", server.url()), "discovery": true}]}
    ]));
    let fetcher = OembedFetcher::new(registry, transport());

    let data = fetcher.fetch_oembed_data(TARGET).await.unwrap();

    assert_eq!(data.title(), Some("from a"));
    a.assert_async().await;
}

#[tokio::test]
async fn test_direct_match_over_http_both_fail() {
    let server = Server::new_async().await;

    let registry = registry(json!([
        {"name": "Example", "endpoints": [
            {"url": format!("{}/oembed", server.url()), "schemes": ["https://example.com/*"]}
        ]}
    ]));
    let fetcher = OembedFetcher::new(registry, transport());

    let err = fetcher.fetch_oembed_data(TARGET).await.unwrap_err();

    assert!(matches!(err, OembedError::Transport(TransportError::Status { .. })));
}
