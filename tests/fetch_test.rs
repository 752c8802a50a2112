//! 出品取得の統合テスト
//!
//! ローカルに立てたダミーの getListing に対してセッション経由で送信し、
//! 状態遷移とエラーメッセージを検証する。

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use listing_invoice::config::Config;
use listing_invoice::fetcher::ListingClient;
use listing_invoice::session::InvoiceSession;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const LISTING_URL: &str =
    "https://www.withgarage.com/listing/2008-pierce-pumper-0f8fad5b-d9cb-469f-a165-70867728950e";
const LISTING_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// 固定のステータスと本文を返すバックエンド
async fn fixed_backend(status: StatusCode, body: &'static str) -> ListingClient {
    let app = Router::new().route("/getListing", post(move || async move { (status, body) }));
    client_for(spawn_backend(app).await)
}

fn client_for(base: String) -> ListingClient {
    let mut config = Config::default();
    config.backend_url = base;
    ListingClient::from_config(&config).unwrap()
}

async fn submit(client: &ListingClient) -> InvoiceSession {
    let mut session = InvoiceSession::new();
    session.set_url(LISTING_URL);
    session.submit(client).await;
    session
}

#[tokio::test]
async fn test_success_populates_listing() {
    // 送られてきた id をそのまま返す
    let app = Router::new().route(
        "/getListing",
        post(|Json(req): Json<Value>| async move {
            Json(json!({
                "result": {
                    "listing": {
                        "id": req["id"],
                        "listingTitle": "2008 Pierce Pumper",
                        "itemBrand": "Pierce",
                        "itemAge": 2008,
                        "sellingPrice": 1234.5,
                        "listingDescription": "Runs great.",
                        "imageUrls": [],
                        "pumpSize": 1500,
                        "categoryV2": { "name": "Pumpers" }
                    }
                }
            }))
        }),
    );
    let client = client_for(spawn_backend(app).await);

    let session = submit(&client).await;

    assert_eq!(session.error(), "");
    assert!(!session.is_loading());
    let listing = session.listing().expect("listing should be set");
    assert_eq!(listing.id, LISTING_ID);
    assert_eq!(listing.listing_title, "2008 Pierce Pumper");
    assert_eq!(listing.pump_size, Some(1500.0));
    assert_eq!(listing.category_name(), Some("Pumpers"));
}

#[tokio::test]
async fn test_error_message_from_failed_status() {
    let client = fixed_backend(StatusCode::NOT_FOUND, r#"{"message":"not found"}"#).await;

    let session = submit(&client).await;

    assert_eq!(session.error(), "not found");
    assert!(session.listing().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_unparseable_failed_body_uses_status() {
    let client = fixed_backend(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await;

    let session = submit(&client).await;

    assert_eq!(session.error(), "Request failed with status 500");
    assert!(session.listing().is_none());
}

#[tokio::test]
async fn test_application_error_field() {
    let client = fixed_backend(StatusCode::OK, r#"{"error":"listing archived"}"#).await;

    let session = submit(&client).await;

    assert_eq!(session.error(), "listing archived");
    assert!(session.listing().is_none());
}

#[tokio::test]
async fn test_missing_listing_object() {
    let client = fixed_backend(StatusCode::OK, r#"{"result":{"listing":null}}"#).await;

    let session = submit(&client).await;

    assert_eq!(session.error(), "Listing data not found in the response.");
    assert!(session.listing().is_none());
}

#[tokio::test]
async fn test_connection_refused_is_reported() {
    // 一度確保したポートを閉じて、接続できないアドレスを作る
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    let session = submit(&client).await;

    assert!(session.error().starts_with("An error occurred: "));
    assert!(session.listing().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_invalid_url_never_hits_backend() {
    let client = fixed_backend(StatusCode::IM_A_TEAPOT, r#"{"message":"unexpected call"}"#).await;

    let mut session = InvoiceSession::new();
    session.set_url("https://example.com/listing/foo");
    session.submit(&client).await;

    assert_eq!(session.error(), "Please enter a valid Garage listing URL.");
    assert!(!session.is_loading());

    // 入力し直すとエラーが消える
    session.set_url(LISTING_URL);
    assert_eq!(session.error(), "");
}

#[tokio::test]
async fn test_failure_clears_previous_listing() {
    let app = Router::new().route(
        "/getListing",
        post(|Json(req): Json<Value>| async move {
            if req["id"] == LISTING_ID {
                (StatusCode::OK, Json(json!({"result": {"listing": {"id": LISTING_ID}}})))
            } else {
                (StatusCode::NOT_FOUND, Json(json!({"message": "not found"})))
            }
        }),
    );
    let client = client_for(spawn_backend(app).await);

    let mut session = submit(&client).await;
    assert!(session.listing().is_some());

    session.set_url("https://www.withgarage.com/listing/other-11111111-2222-3333-4444-555555555555");
    session.submit(&client).await;

    assert!(session.listing().is_none());
    assert_eq!(session.error(), "not found");
}
