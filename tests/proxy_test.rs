//! 画像プロキシの統合テスト

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use listing_invoice::proxy::{self, proxy_url_for, LocalProxy};
use serde_json::Value;
use tokio::net::TcpListener;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// 画像配信元のダミー
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/typed.png",
            get(|| async { ([(CONTENT_TYPE, "image/png")], PNG_MAGIC) }),
        )
        .route(
            "/untyped",
            get(|| async { Response::new(Body::from(&b"raw-bytes"[..])) }),
        )
        .route("/missing.jpg", get(|| async { StatusCode::NOT_FOUND }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn get_via_proxy(proxy: &LocalProxy, image_url: &str) -> reqwest::Response {
    let url = proxy_url_for(&proxy.base_url(), image_url).unwrap();
    reqwest::get(url).await.unwrap()
}

#[tokio::test]
async fn test_missing_image_url_is_bad_request() {
    let proxy = LocalProxy::spawn(reqwest::Client::new()).await.unwrap();

    let response = reqwest::get(format!("{}{}", proxy.base_url(), proxy::IMAGE_PROXY_PATH))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "imageUrl query parameter is required");
}

#[tokio::test]
async fn test_bytes_and_content_type_pass_through() {
    let upstream = spawn_upstream().await;
    let proxy = LocalProxy::spawn(reqwest::Client::new()).await.unwrap();

    let response = get_via_proxy(&proxy, &format!("{}/typed.png", upstream)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[CACHE_CONTROL], proxy::CACHE_CONTROL_VALUE);
    assert_eq!(&response.bytes().await.unwrap()[..], PNG_MAGIC);
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_jpeg() {
    let upstream = spawn_upstream().await;
    let proxy = LocalProxy::spawn(reqwest::Client::new()).await.unwrap();

    let response = get_via_proxy(&proxy, &format!("{}/untyped", upstream)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE),
        Some(&HeaderValue::from_static(proxy::DEFAULT_CONTENT_TYPE))
    );
    assert_eq!(&response.bytes().await.unwrap()[..], b"raw-bytes");
}

#[tokio::test]
async fn test_upstream_status_is_forwarded() {
    let upstream = spawn_upstream().await;
    let proxy = LocalProxy::spawn(reqwest::Client::new()).await.unwrap();

    let response = get_via_proxy(&proxy, &format!("{}/missing.jpg", upstream)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch image from the provided URL");
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);
    let proxy = LocalProxy::spawn(reqwest::Client::new()).await.unwrap();

    let response = get_via_proxy(&proxy, &format!("http://{}/a.jpg", closed)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error while fetching image");
}

#[tokio::test]
async fn test_serve_stops_on_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(proxy::serve(listener, reqwest::Client::new(), async move {
        let _ = rx.await;
    }));

    let health = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");

    tx.send(()).unwrap();
    assert!(server.await.unwrap().is_ok());
}
