//! Tag fetch integration tests against a local HTTP fixture.

use axum::extract::Query;
use axum::http::header::{HOST, LINK};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use secforge_core::tools::{Dispatcher, HttpTagSource, TagSource};
use secforge_core::{Config, Error};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Tags in the paged fixture repository.
const PAGED_TOTAL: usize = 250;

/// Helper: serve `app` on a random local port.
async fn start_fixture(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Serves `PAGED_TOTAL` tags the way GitHub does: 30 per page unless
/// `per_page` says otherwise (capped at 100), with a `Link` header pointing at
/// the next page.
async fn paged_tags(
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (HeaderMap, Json<Value>) {
    let (per_page, page) = page_params(&query);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(PAGED_TOTAL);
    let tags = tag_range(start, end);

    let mut response_headers = HeaderMap::new();
    if end < PAGED_TOTAL {
        let host = headers.get(HOST).unwrap().to_str().unwrap();
        let link = format!(
            "<http://{}/repos/acme/big/tags?per_page={}&page={}>; rel=\"next\"",
            host,
            per_page,
            page + 1
        );
        response_headers.insert(LINK, HeaderValue::from_str(&link).unwrap());
    }
    (response_headers, Json(json!(tags)))
}

/// First page only, without a `Link` header.
async fn unlinked_tags(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let (per_page, _) = page_params(&query);
    Json(json!(tag_range(0, per_page.min(PAGED_TOTAL))))
}

fn page_params(query: &HashMap<String, String>) -> (usize, usize) {
    let per_page = query
        .get("per_page")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(30)
        .min(100);
    let page = query
        .get("page")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    (per_page, page)
}

fn tag_range(start: usize, end: usize) -> Vec<Value> {
    (start..end)
        .map(|i| json!({"name": format!("v{}", i)}))
        .collect()
}

fn fixture() -> Router {
    Router::new()
        .route("/repos/acme/big/tags", get(paged_tags))
        .route("/repos/acme/unlinked/tags", get(unlinked_tags))
        .route(
            "/repos/acme/templates/tags",
            get(|| async {
                Json(json!([
                    {"name": "v10.2.0", "commit": {"sha": "a1"}},
                    {"name": "v10.1.1", "commit": {"sha": "b2"}},
                    {"name": "v9.9.9", "commit": {"sha": "c3"}},
                ]))
            }),
        )
        .route(
            "/repos/acme/broken/tags",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/repos/acme/garbage/tags",
            get(|| async { Json(json!({"message": "rate limited"})) }),
        )
        .route(
            "/repos/acme/slow/tags",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([]))
            }),
        )
}

async fn dispatcher_for(addr: SocketAddr) -> Dispatcher {
    let mut config = Config::default();
    config.fetch.api_base = format!("http://{}", addr);
    config.fetch.default_repository = "acme/templates".to_string();
    config.fetch.timeout = Duration::from_millis(300);
    Dispatcher::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_http_source_reads_tag_names() {
    let addr = start_fixture(fixture()).await;
    let mut config = Config::default().fetch;
    config.api_base = format!("http://{}/", addr);

    let source = HttpTagSource::new(&config).unwrap();
    let tags = source.fetch_tags("acme/templates", 100).await.unwrap();
    assert_eq!(tags, vec!["v10.2.0", "v10.1.1", "v9.9.9"]);
}

#[tokio::test]
async fn test_http_source_follows_next_links() {
    let addr = start_fixture(fixture()).await;
    let mut config = Config::default().fetch;
    config.api_base = format!("http://{}", addr);
    let source = HttpTagSource::new(&config).unwrap();

    let tags = source.fetch_tags("acme/big", 230).await.unwrap();
    assert_eq!(tags.len(), 230);
    assert_eq!(tags[0], "v0");
    assert_eq!(tags[229], "v229");

    let all = source.fetch_tags("acme/big", 1000).await.unwrap();
    assert_eq!(all.len(), PAGED_TOTAL);
}

#[tokio::test]
async fn test_http_source_sends_page_size() {
    let addr = start_fixture(fixture()).await;
    let mut config = Config::default().fetch;
    config.api_base = format!("http://{}", addr);
    let source = HttpTagSource::new(&config).unwrap();

    // No next link here, so anything past 30 needs per_page
    let tags = source.fetch_tags("acme/unlinked", 45).await.unwrap();
    assert_eq!(tags.len(), 45);
    assert_eq!(tags[44], "v44");
}

#[tokio::test]
async fn test_limit_above_default_page_size() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr)
        .await
        .call("github-tags", &json!({"repository": "acme/big", "limit": 80}))
        .await;

    assert!(!resp.is_error);
    let text = resp.joined_text();
    assert!(text.starts_with("Tags for acme/big (80 listed):"), "{text}");
    assert_eq!(text.lines().count(), 81);
    assert!(text.ends_with("\n- v79"));
}

#[tokio::test]
async fn test_filter_scans_later_pages() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr)
        .await
        .call("github-tags", &json!({"repository": "acme/big", "filter": "v24"}))
        .await;

    // v24 and v240..=v249, the latter only on the third page of 100
    let text = resp.joined_text();
    assert!(text.starts_with("Tags for acme/big (11 listed):"), "{text}");
    assert!(text.ends_with("\n- v249"));
}

#[tokio::test]
async fn test_default_repository_listing() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr).await.call("github-tags", &json!({})).await;

    assert!(!resp.is_error);
    assert_eq!(
        resp.joined_text(),
        "Tags for acme/templates (3 listed):\n- v10.2.0\n- v10.1.1\n- v9.9.9"
    );
}

#[tokio::test]
async fn test_filter_and_limit() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr)
        .await
        .call("github-tags", &json!({"filter": "v10", "limit": 1}))
        .await;
    assert_eq!(resp.joined_text(), "Tags for acme/templates (1 listed):\n- v10.2.0");
}

#[tokio::test]
async fn test_http_status_failure_is_error_envelope() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr)
        .await
        .call("github-tags", &json!({"repository": "acme/broken"}))
        .await;

    assert!(resp.is_error);
    assert_eq!(
        resp.joined_text(),
        "Failed to fetch tag list: HTTP 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_unexpected_body_is_error_envelope() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr)
        .await
        .call("github-tags", &json!({"repository": "acme/garbage"}))
        .await;

    assert!(resp.is_error);
    assert!(resp.joined_text().starts_with("Failed to fetch tag list:"));
}

#[tokio::test]
async fn test_timeout_is_error_envelope() {
    let addr = start_fixture(fixture()).await;
    let resp = dispatcher_for(addr)
        .await
        .call("github-tags", &json!({"repository": "acme/slow"}))
        .await;

    assert!(resp.is_error);
    assert!(resp.joined_text().contains("timed out"), "{}", resp.joined_text());
}

#[tokio::test]
async fn test_connection_refused_is_fetch_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::default().fetch;
    config.api_base = format!("http://{}", addr);
    let source = HttpTagSource::new(&config).unwrap();

    let err = source.fetch_tags("acme/templates", 10).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
}
