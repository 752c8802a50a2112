//! 画像プロキシ
//!
//! `GET /api/image-proxy?imageUrl=<url>` で外部画像を取得し、バイト列を無加工で返す。
//! PDFへ画像を埋め込む際のクロスオリジン制限を避けるための中継。

mod error;

pub use error::ProxyError;

use crate::error::{InvoiceError, Result};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub const IMAGE_PROXY_PATH: &str = "/api/image-proxy";
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=3600";

/// プロキシの共有状態
#[derive(Debug, Clone)]
pub struct ProxyState {
    pub http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// ルーター構築
pub fn router(http: reqwest::Client) -> Router {
    Router::new()
        .route(IMAGE_PROXY_PATH, get(image_proxy))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(ProxyState { http }))
}

async fn health() -> &'static str {
    "ok"
}

async fn image_proxy(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<ProxyParams>,
) -> std::result::Result<Response, ProxyError> {
    let image_url = params
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or(ProxyError::MissingImageUrl)?;

    debug!(%image_url, "proxying image");
    let upstream = state.http.get(&image_url).send().await?;

    let status = upstream.status();
    if !status.is_success() {
        warn!(%image_url, %status, "upstream image request failed");
        return Err(ProxyError::Upstream(status));
    }

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let bytes = upstream.bytes().await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE)),
        ],
        Body::from(bytes),
    )
        .into_response())
}

/// 画像URLに対応するプロキシURL
pub fn proxy_url_for(base_url: &str, image_url: &str) -> Result<reqwest::Url> {
    let base = base_url.trim_end_matches('/');
    let mut url = reqwest::Url::parse(&format!("{}{}", base, IMAGE_PROXY_PATH))
        .map_err(|e| InvoiceError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    url.query_pairs_mut().append_pair("imageUrl", image_url);
    Ok(url)
}

/// 指定のリスナーでプロキシを起動（shutdown が完了するまで返らない）
pub async fn serve<F>(listener: TcpListener, http: reqwest::Client, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "image proxy listening");
    axum::serve(listener, router(http))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| InvoiceError::Server(e.to_string()))?;
    info!("image proxy stopped");
    Ok(())
}

/// プロセス内で起動したプロキシ
pub struct LocalProxy {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl LocalProxy {
    /// 127.0.0.1 の空きポートで起動
    pub async fn spawn(http: reqwest::Client) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router(http)).await {
                warn!(error = %e, "local image proxy exited");
            }
        });
        debug!(%addr, "local image proxy started");
        Ok(Self { addr, handle })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for LocalProxy {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
