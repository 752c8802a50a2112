//! listing-invoice Common Library
//!
//! CLIとプロキシで共有される型と、I/Oを伴わないロジック
//! （URL検証・フォーマット・PDFレイアウト計算）

pub mod types;
pub mod validator;
pub mod format;
pub mod fields;
pub mod layout;
pub mod text;
pub mod response;
pub mod image_policy;
pub mod error;
pub mod export;

pub use types::{invoice_file_name, Category, FetchResult, Listing, ListingId};
pub use validator::{clears_error_on_input, validate_listing_url, INVALID_URL_MESSAGE, LISTING_URL_PREFIX};
pub use format::{format_currency, format_grouped, format_plain};
pub use fields::{listing_rows, FieldRow};
pub use layout::PageLayout;
pub use response::interpret_response;
pub use image_policy::{ImagePolicy, RemotePattern};
pub use error::{Error, Result};
