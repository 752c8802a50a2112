//! プロキシのエラー型
//!
//! すべて `{"error": "..."}` のJSON本文に変換する。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("imageUrl query parameter is required")]
    MissingImageUrl,

    /// 取得先が2xx以外を返した（ステータスはそのまま返す）
    #[error("upstream returned {0}")]
    Upstream(StatusCode),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::MissingImageUrl => (StatusCode::BAD_REQUEST, "imageUrl query parameter is required"),
            ProxyError::Upstream(status) => (*status, "Failed to fetch image from the provided URL"),
            ProxyError::Fetch(e) => {
                error!(error = %e, "image proxy error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error while fetching image",
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
