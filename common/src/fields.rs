//! カードとPDF表で共通の項目行
//!
//! 両方が同じ文字列を表示するよう、ラベルと値の整形はここに集約する。

use crate::format::{format_currency, format_grouped, format_plain};
use crate::types::Listing;

pub const LABEL_BRAND: &str = "Brand";
pub const LABEL_YEAR: &str = "Year";
pub const LABEL_PRICE: &str = "Price";
pub const LABEL_CATEGORY: &str = "Category";
pub const LABEL_PUMP_SIZE: &str = "Pump Size (GPM)";
pub const LABEL_TANK_SIZE: &str = "Tank Size (Gal)";
pub const LABEL_MILEAGE: &str = "Mileage";

/// 表の1行
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub label: &'static str,
    pub value: String,
}

impl FieldRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// 出品の項目行を構築
///
/// Brand / Year / Price は常に出力し、任意項目は値があるときだけ追加する。
pub fn listing_rows(listing: &Listing) -> Vec<FieldRow> {
    let mut rows = vec![
        FieldRow::new(LABEL_BRAND, listing.item_brand.clone()),
        FieldRow::new(LABEL_YEAR, format_plain(listing.item_age)),
        FieldRow::new(LABEL_PRICE, format_currency(listing.selling_price)),
    ];

    if let Some(name) = listing.category_name() {
        rows.push(FieldRow::new(LABEL_CATEGORY, name.to_string()));
    }
    if let Some(pump) = listing.pump_size {
        rows.push(FieldRow::new(LABEL_PUMP_SIZE, format_plain(pump)));
    }
    if let Some(tank) = listing.tank_size {
        rows.push(FieldRow::new(LABEL_TANK_SIZE, format_plain(tank)));
    }
    if let Some(mileage) = listing.mileage {
        rows.push(FieldRow::new(LABEL_MILEAGE, format_grouped(mileage)));
    }

    rows
}
