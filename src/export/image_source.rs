//! PDF埋め込み用の画像取得

use crate::error::{InvoiceError, Result};
use crate::proxy::proxy_url_for;
use async_trait::async_trait;
use tracing::debug;

/// 画像のバイト列を取得する経路
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>>;

    fn source_name(&self) -> &'static str;
}

/// 画像プロキシ経由で取得
#[derive(Debug, Clone)]
pub struct ProxyImageSource {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyImageSource {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ImageSource for ProxyImageSource {
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        let url = proxy_url_for(&self.base_url, image_url)?;
        debug!(%url, "fetching image via proxy");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InvoiceError::ImageFetch(format!(
                "Failed to fetch image via proxy: {}",
                status
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }

    fn source_name(&self) -> &'static str {
        "image-proxy"
    }
}
