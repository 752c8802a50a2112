//! 請求書PDFの生成
//!
//! 画像取得 → デコード → 配置計算 → 表 → 説明文 → 書き出し の順に進む。
//! 失敗を吸収するのは画像の段だけで、それ以外のエラーは呼び出し側へ返す。

pub mod image_source;
pub mod pdf;

pub use image_source::{ImageSource, ProxyImageSource};

use crate::error::Result;
use image::DynamicImage;
use listing_invoice_common::export::{compose_document, DocumentPlan, ImageDimensions};
use listing_invoice_common::{invoice_file_name, Listing, PageLayout};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 生成済みの請求書
#[derive(Debug)]
pub struct InvoiceDocument {
    pub file_name: String,
    pub plan: DocumentPlan,
    pub bytes: Vec<u8>,
}

impl InvoiceDocument {
    pub fn has_image(&self) -> bool {
        self.plan.image().is_some()
    }

    /// 出力ディレクトリに保存してパスを返す
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// 先頭画像を取得してデコードする
///
/// 取得・デコードのどこで失敗しても None を返し、ログにだけ残す。
pub async fn acquire_image(listing: &Listing, source: &dyn ImageSource) -> Option<DynamicImage> {
    let image_url = listing.primary_image_url()?;

    let bytes = match source.fetch_image(image_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%image_url, source = source.source_name(), error = %e, "could not add image to PDF");
            return None;
        }
    };

    match image::load_from_memory(&bytes) {
        Ok(image) => {
            debug!(width = image.width(), height = image.height(), "image decoded");
            Some(image)
        }
        Err(e) => {
            warn!(%image_url, error = %e, "error loading image for PDF");
            None
        }
    }
}

/// 請求書PDFを生成
pub async fn generate_invoice(listing: &Listing, source: &dyn ImageSource) -> Result<InvoiceDocument> {
    // 表の開始位置が画像の高さに依存するため、画像の段を先に終わらせる
    let image = acquire_image(listing, source).await;
    render_invoice(listing, image.as_ref())
}

/// 取得済みの画像（任意）から請求書PDFを組み立てる
pub fn render_invoice(listing: &Listing, image: Option<&DynamicImage>) -> Result<InvoiceDocument> {
    let dims = image.map(|img| ImageDimensions {
        pixel_width: img.width(),
        pixel_height: img.height(),
    });
    let plan = compose_document(listing, dims, &PageLayout::a4());
    let bytes = pdf::write_pdf(&plan, image)?;

    Ok(InvoiceDocument {
        file_name: invoice_file_name(&listing.id),
        plan,
        bytes,
    })
}
