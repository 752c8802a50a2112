//! 出品データの型定義
//!
//! CLIとプロキシで共有される型:
//! - Listing: バックエンドの getListing が返す出品レコード
//! - ApiResponse / ApiError: getListing のレスポンス形状
//! - FetchResult: 取得処理の最終結果（成功 or エラーメッセージ）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 出品ID（URL末尾の36文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// バリデーション済みの文字列から生成（validator以外からは使わない）
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 出力PDFのファイル名: `listing-<id>.pdf`
    pub fn pdf_file_name(&self) -> String {
        invoice_file_name(&self.0)
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 出品IDから出力ファイル名を決める（パス区切りは `_` に置換）
pub fn invoice_file_name(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("listing-{}.pdf", safe)
}

/// カテゴリ（categoryV2）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
}

/// 出品レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,

    #[serde(default)]
    pub listing_title: String,

    #[serde(default)]
    pub item_brand: String,

    /// 年式
    #[serde(default)]
    pub item_age: f64,

    /// 販売価格（USD）
    #[serde(default)]
    pub selling_price: f64,

    #[serde(default)]
    pub listing_description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_urls: Vec<String>,

    /// ポンプ容量（GPM）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_size: Option<f64>,

    /// タンク容量（Gal）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,

    #[serde(default, rename = "categoryV2", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Listing {
    /// 先頭の画像URL（カードとPDFで使用）
    pub fn primary_image_url(&self) -> Option<&str> {
        self.image_urls
            .first()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// 表示対象のカテゴリ名（名前が空なら None）
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// getListing の result 部分
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub listing: Option<serde_json::Value>,
}

/// getListing の成功レスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub result: Option<ApiResult>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// getListing のエラーレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

/// 取得処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Listing(Listing),
    Failed(String),
}

impl FetchResult {
    pub fn is_listing(&self) -> bool {
        matches!(self, FetchResult::Listing(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchResult::Failed(message) => Some(message),
            FetchResult::Listing(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_listing() {
        let json = r#"{
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "listingTitle": "2008 Pierce Pumper",
            "itemBrand": "Pierce",
            "itemAge": 2008,
            "sellingPrice": 1234.5,
            "listingDescription": "Runs great",
            "imageUrls": ["https://example.com/a.jpg"],
            "pumpSize": 1500,
            "tankSize": 750,
            "mileage": 45210,
            "categoryV2": { "name": "Pumpers" }
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.listing_title, "2008 Pierce Pumper");
        assert_eq!(listing.item_age, 2008.0);
        assert_eq!(listing.pump_size, Some(1500.0));
        assert_eq!(listing.category_name(), Some("Pumpers"));
        assert_eq!(listing.primary_image_url(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn test_deserialize_nulls_as_absent() {
        let json = r#"{
            "id": "x",
            "imageUrls": null,
            "pumpSize": null,
            "tankSize": null,
            "mileage": null,
            "categoryV2": null
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.image_urls.is_empty());
        assert!(listing.pump_size.is_none());
        assert!(listing.tank_size.is_none());
        assert!(listing.mileage.is_none());
        assert!(listing.category.is_none());
        assert!(listing.primary_image_url().is_none());
    }

    #[test]
    fn test_empty_category_name_is_hidden() {
        let listing = Listing {
            category: Some(Category { name: String::new() }),
            ..Default::default()
        };
        assert!(listing.category_name().is_none());
    }

    #[test]
    fn test_pdf_file_name() {
        let id = ListingId::new("0f8fad5b-d9cb-469f-a165-70867728950e");
        assert_eq!(id.pdf_file_name(), "listing-0f8fad5b-d9cb-469f-a165-70867728950e.pdf");
        assert_eq!(invoice_file_name("../x"), "listing-.._x.pdf");
    }
}
