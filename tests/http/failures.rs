use std::sync::Arc;

use serde_json::{json, Value};
use svg_relay::{http, NewSvgRecord, StoreError, SvgRecord, SvgStore, SvgSubmissionService};

const BACKEND_ERROR: &str = "connection refused";

/// A store whose backend is unreachable.
struct UnavailableStore;

impl SvgStore for UnavailableStore {
    fn create(&self, _record: NewSvgRecord) -> Result<SvgRecord, StoreError> {
        Err(StoreError::Unavailable(BACKEND_ERROR.into()))
    }

    fn current(&self) -> Result<Option<SvgRecord>, StoreError> {
        Err(StoreError::Unavailable(BACKEND_ERROR.into()))
    }

    fn all(&self) -> Result<Vec<SvgRecord>, StoreError> {
        Err(StoreError::Unavailable(BACKEND_ERROR.into()))
    }

    fn len(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable(BACKEND_ERROR.into()))
    }
}

async fn start_unavailable_server() -> String {
    let service = Arc::new(SvgSubmissionService::new(UnavailableStore));
    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn assert_generic_failure(body: &Value, expected: &str) {
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert_eq!(message, expected);
    assert!(!message.contains(BACKEND_ERROR));
}

#[tokio::test]
async fn post_with_store_down_returns_generic_500() {
    let base = start_unavailable_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/svg"))
        .json(&json!({ "content": "<svg><circle r=\"4\"/></svg>" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_generic_failure(
        &body,
        "Internal server error occurred while processing the SVG",
    );
}

#[tokio::test]
async fn validation_still_wins_over_store_down() {
    let base = start_unavailable_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/svg"))
        .json(&json!({ "content": "not svg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn current_with_store_down_returns_generic_500() {
    let base = start_unavailable_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/svg/current"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_generic_failure(&body, "Internal server error occurred while fetching the SVG");
}

#[tokio::test]
async fn sanitized_with_store_down_returns_generic_500() {
    let base = start_unavailable_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/svg/current/sanitized"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_generic_failure(&body, "Internal server error occurred while fetching the SVG");
}

#[tokio::test]
async fn health_with_store_down_is_500() {
    let base = start_unavailable_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], false);
}
