//! 出品データ取得
//!
//! getListing へ `{"id": ...}` をPOSTし、結果を必ず FetchResult に落とす。
//! 通信エラーもここでメッセージに変換し、呼び出し側へは伝播させない。

use crate::config::Config;
use crate::error::Result;
use listing_invoice_common::response::{parse_body, transport_failure_message};
use listing_invoice_common::{interpret_response, FetchResult, ListingId};
use serde::Serialize;
use tracing::{debug, error, warn};

#[derive(Serialize)]
struct ListingRequest<'a> {
    id: &'a str,
}

/// getListing クライアント
#[derive(Debug, Clone)]
pub struct ListingClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ListingClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.http_client()?, config.listing_endpoint()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 出品を1件取得
    pub async fn fetch(&self, id: &ListingId) -> FetchResult {
        debug!(endpoint = %self.endpoint, id = %id, "requesting listing");

        let response = match self
            .http
            .post(&self.endpoint)
            .json(&ListingRequest { id: id.as_str() })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "listing request failed");
                return FetchResult::Failed(transport_failure_message(&e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, status, "failed to read listing response body");
                return FetchResult::Failed(transport_failure_message(&e.to_string()));
            }
        };

        let json = parse_body(&body);
        if json.is_none() {
            warn!(status, bytes = body.len(), "could not parse JSON from listing response");
        }

        let result = interpret_response(status, json);
        match &result {
            FetchResult::Listing(listing) => debug!(status, title = %listing.listing_title, "listing received"),
            FetchResult::Failed(message) => warn!(status, %message, "listing request rejected"),
        }
        result
    }
}
