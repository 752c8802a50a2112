//! 出品カードの表示
//!
//! 表示専用。PDF生成は行わず、実行するかどうかは呼び出し側が決める。

use listing_invoice_common::{listing_rows, FieldRow, ImagePolicy, Listing};
use std::fmt;

/// カードが呼び出し側に提示する唯一の操作
pub const DOWNLOAD_ACTION: &str = "Download PDF";

const CARD_HEADING: &str = "Listing Details";
const LABEL_WIDTH: usize = 16;

/// 画像欄の表示
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePreview {
    /// 許可ホストの画像
    Allowed(String),
    /// 許可リスト外（URLのみ表示）
    NotAllowed(String),
}

/// 出品カード
#[derive(Debug, Clone)]
pub struct ListingCard {
    pub title: String,
    pub image: Option<ImagePreview>,
    pub rows: Vec<FieldRow>,
    pub description: String,
}

impl ListingCard {
    pub fn new(listing: &Listing, policy: &ImagePolicy) -> Self {
        let image = listing.primary_image_url().map(|url| {
            if policy.permits(url).unwrap_or(false) {
                ImagePreview::Allowed(url.to_string())
            } else {
                ImagePreview::NotAllowed(url.to_string())
            }
        });

        Self {
            title: listing.listing_title.clone(),
            image,
            rows: listing_rows(listing),
            description: listing.listing_description.clone(),
        }
    }

    pub fn has_row(&self, label: &str) -> bool {
        self.rows.iter().any(|r| r.label == label)
    }

    pub fn action_label(&self) -> &'static str {
        DOWNLOAD_ACTION
    }
}

impl fmt::Display for ListingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "── {} ──", CARD_HEADING)?;

        match &self.image {
            Some(ImagePreview::Allowed(url)) => writeln!(f, "{:<w$} {}", "Image", url, w = LABEL_WIDTH)?,
            Some(ImagePreview::NotAllowed(url)) => {
                writeln!(f, "{:<w$} {} (host not in allow-list)", "Image", url, w = LABEL_WIDTH)?
            }
            None => {}
        }

        writeln!(f, "{:<w$} {}", "Title", self.title, w = LABEL_WIDTH)?;
        for row in &self.rows {
            writeln!(f, "{:<w$} {}", row.label, row.value, w = LABEL_WIDTH)?;
        }

        writeln!(f, "Description")?;
        for line in self.description.lines() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// 出品がなければ何も表示しない
pub fn render_card(listing: Option<&Listing>, policy: &ImagePolicy) -> Option<ListingCard> {
    listing.map(|l| ListingCard::new(l, policy))
}
