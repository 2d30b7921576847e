//! Middleware stack and serving behaviour of the HTTP host.

use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;
use tracing_test::traced_test;

use api_ingress::{ApiIngress, ApiIngressConfig};

fn routes() -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/echo", post(|body: Bytes| async move { body }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                r#"{"message":"success","data":[]}"#
            }),
        )
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> axum::response::Response {
    app.oneshot(Request::builder().method(method).uri(uri).body(body).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn unknown_paths_get_empty_404() {
    let app = ApiIngress::default().build_router(routes());

    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(app.clone(), method.clone(), "/nowhere", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty(), "{method} fallback body must be empty");
    }
}

#[tokio::test]
async fn slow_handlers_run_to_completion() {
    let app = ApiIngress::default().build_router(routes());

    let response = send(app, Method::GET, "/slow", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], br#"{"message":"success","data":[]}"#);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let ingress = ApiIngress::new(ApiIngressConfig {
        body_limit_bytes: 8,
        ..Default::default()
    });
    let app = ingress.build_router(routes());

    let ok = send(app.clone(), Method::POST, "/echo", Body::from("small")).await;
    assert_eq!(ok.status(), StatusCode::OK);

    let too_big = send(app, Method::POST, "/echo", Body::from("far too large")).await;
    assert_eq!(too_big.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_headers_only_when_enabled() {
    let preflight = || {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/ping")
            .header("origin", "http://example.test")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap()
    };

    let enabled = ApiIngress::new(ApiIngressConfig {
        cors_enabled: true,
        ..Default::default()
    })
    .build_router(routes());
    let response = enabled.oneshot(preflight()).await.unwrap();
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));

    let disabled = ApiIngress::default().build_router(routes());
    let response = disabled.oneshot(preflight()).await.unwrap();
    assert!(!response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
#[traced_test]
async fn requests_are_traced_with_request_id() {
    let app = ApiIngress::default().build_router(routes());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ping")
                .header("x-request-id", "trace-me-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(logs_contain("http_request"));
    assert!(logs_contain("trace-me-42"));
    assert!(logs_contain("request completed"));
}

#[tokio::test]
async fn serve_answers_and_stops_on_cancel() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();

    let ingress = ApiIngress::default();
    let router = ingress.build_router(routes());
    let server = tokio::spawn({
        let cancel = cancel.clone();
        async move { ingress.serve_with_listener(router, listener, cancel).await }
    });

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
    assert!(raw.ends_with("pong"));

    cancel.cancel();
    server.await.unwrap().unwrap();
}
