use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("URLが不正です: {0}")]
    InvalidUrl(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("画像取得エラー: {0}")]
    ImageFetch(String),

    #[error("画像デコードエラー: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("サーバーエラー: {0}")]
    Server(String),

    #[error("出品を取得できませんでした: {0}")]
    Listing(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

impl From<listing_invoice_common::Error> for InvoiceError {
    fn from(e: listing_invoice_common::Error) -> Self {
        match e {
            listing_invoice_common::Error::Json(e) => InvoiceError::JsonParse(e),
            listing_invoice_common::Error::InvalidUrl(url) => InvoiceError::InvalidUrl(url),
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
