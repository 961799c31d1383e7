//! HTTP API tests against mock services.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use comment_insights::testing::fake_comments;
use comment_insights::{
    ClassifierConfig, CompletionError, IngestError, MockAI, MockCommentSource,
};
use serde_json::{json, Value};
use server_core::server::{build_app, AppState};
use tower::ServiceExt;

fn app(source: MockCommentSource, ai: MockAI) -> Router {
    app_with(source, ai, Duration::ZERO, Duration::from_secs(30))
}

fn app_with(
    source: MockCommentSource,
    ai: MockAI,
    batch_interval: Duration,
    request_timeout: Duration,
) -> Router {
    let classifier = ClassifierConfig::new().with_batch_interval(batch_interval);
    let state = AppState::new(Arc::new(source), Arc::new(ai), classifier);
    build_app(state, request_timeout)
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(MockCommentSource::new(), MockAI::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["uptimeSeconds"].is_u64());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_fetch_comments() {
    let source = MockCommentSource::paged(fake_comments(150), 100);
    let (status, body) = post(
        app(source.clone(), MockAI::new()),
        "/api/comments",
        json!({"videoUrl": "https://youtu.be/dQw4w9WgXcQ", "order": "relevance"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videoId"], "dQw4w9WgXcQ");
    assert_eq!(body["totalCount"], 150);
    assert_eq!(body["truncated"], false);
    assert_eq!(body["comments"][0]["commentId"], "comment-0");

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].video_id, "dQw4w9WgXcQ");
    assert_eq!(requests[0].page_size, 100);
}

#[tokio::test]
async fn test_invalid_url_is_rejected_without_upstream_call() {
    let source = MockCommentSource::paged(fake_comments(5), 5);
    let (status, body) = post(
        app(source.clone(), MockAI::new()),
        "/api/comments",
        json!({"videoUrl": "https://example.com/watch?v=dQw4w9WgXcQ"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_URL");
    assert_eq!(body["retryable"], false);
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_errors_keep_their_code() {
    let source = MockCommentSource::new()
        .failing_on(None, || IngestError::QuotaExceeded("daily limit".into()));
    let (status, body) = post(
        app(source, MockAI::new()),
        "/api/comments",
        json!({"videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "QUOTA_EXCEEDED");
    assert_eq!(body["retryable"], true);

    let source = MockCommentSource::new().failing_on(None, || IngestError::CommentsDisabled);
    let (status, body) = post(
        app(source, MockAI::new()),
        "/api/comments",
        json!({"videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "COMMENTS_DISABLED");
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/comments")
        .header("content-type", "application/json")
        .body(Body::from("{\"videoUrl\": "))
        .unwrap();
    let (status, body) = send(app(MockCommentSource::new(), MockAI::new()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_out_of_range_page_size() {
    let (status, body) = post(
        app(MockCommentSource::new(), MockAI::new()),
        "/api/comments",
        json!({"videoUrl": "https://youtu.be/dQw4w9WgXcQ", "maxResults": 500}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_analyze_returns_report() {
    let comments = serde_json::to_value(fake_comments(9)).unwrap();
    let (status, body) = post(
        app(MockCommentSource::new(), MockAI::new()),
        "/api/analyze",
        json!({ "comments": comments }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 9);
    assert_eq!(body["categorizedComments"]["positive"].as_array().unwrap().len(), 3);
    assert_eq!(body["insights"].as_array().unwrap().len(), 3);
    assert_eq!(body["insights"][0]["category"], "positive");
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn test_analyze_empty_is_no_comments() {
    let ai = MockAI::new();
    let (status, body) = post(
        app(MockCommentSource::new(), ai.clone()),
        "/api/analyze",
        json!({ "comments": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_COMMENTS");
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_surfaces_classification_failure() {
    let comments = serde_json::to_value(fake_comments(3)).unwrap();
    let ai = MockAI::new().with_error(CompletionError::Network("connection reset".into()));
    let (status, body) = post(
        app(MockCommentSource::new(), ai),
        "/api/analyze",
        json!({ "comments": comments }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "NETWORK_ERROR");
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn test_concurrent_analyses_do_not_share_a_throttle() {
    // One batch plus synthesis per request: a single interval of waiting each.
    let interval = Duration::from_millis(300);
    let app = app_with(
        MockCommentSource::new(),
        MockAI::new(),
        interval,
        Duration::from_secs(30),
    );
    let body = json!({ "comments": serde_json::to_value(fake_comments(10)).unwrap() });

    let start = std::time::Instant::now();
    let (first, second) = tokio::join!(
        post(app.clone(), "/api/analyze", body.clone()),
        post(app, "/api/analyze", body),
    );
    let elapsed = start.elapsed();

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    assert!(elapsed >= interval, "throttle skipped: {elapsed:?}");
    // A shared limiter would serialize four permits: three intervals.
    assert!(elapsed < interval * 2, "requests waited on each other: {elapsed:?}");
}

#[tokio::test]
async fn test_request_timeout_renders_error_body() {
    // The second batch waits a full interval, well past the request deadline.
    let app = app_with(
        MockCommentSource::new(),
        MockAI::new(),
        Duration::from_secs(5),
        Duration::from_millis(100),
    );
    let comments = serde_json::to_value(fake_comments(60)).unwrap();
    let (status, body) = post(app, "/api/analyze", json!({ "comments": comments })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "NETWORK_ERROR");
    assert_eq!(body["retryable"], true);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}
