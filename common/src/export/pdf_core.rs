//! PDFレイアウト計算（描画ライブラリ非依存）
//!
//! 出品データと画像サイズから、各ページに描く要素の配置（mm、上端基準）を決める。
//! 実際のPDF出力は CLI 側の `export::pdf` が行う。

use crate::fields::{listing_rows, FieldRow};
use crate::layout::*;
use crate::text::{to_builtin_text, wrap_text};
use crate::types::Listing;

pub const TABLE_HEAD: [&str; 2] = ["Item", "Details"];
pub const DESCRIPTION_LABEL: &str = "Description:";

/// 埋め込む画像の画素サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// ページ上の描画要素
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// テキスト1行。`y_mm` はベースライン
    Text {
        text: String,
        x_mm: f32,
        y_mm: f32,
        font_pt: f32,
        bold: bool,
        color: Rgb,
    },
    /// 塗りつぶし矩形。`y_mm` は上端
    Rect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        fill: Rgb,
    },
    /// 画像。`y_mm` は上端
    Image {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub elements: Vec<Element>,
}

/// 文書全体の配置
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub title: String,
    pub layout: PageLayout,
    pub pages: Vec<PagePlan>,
    /// 表の下端（最終ページ上、mm）
    pub table_end_mm: f32,
}

impl DocumentPlan {
    /// 全ページのテキスト行
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.elements.iter()).filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    pub fn image(&self) -> Option<&Element> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .find(|e| matches!(e, Element::Image { .. }))
    }
}

/// 配置中のカーソル
struct Cursor {
    layout: PageLayout,
    pages: Vec<PagePlan>,
    y_mm: f32,
}

impl Cursor {
    fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: vec![PagePlan::default()],
            y_mm: 0.0,
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    /// 高さ `height_mm` が収まらなければ改ページ。改ページしたら true
    fn ensure_room(&mut self, height_mm: f32) -> bool {
        if self.y_mm + height_mm > self.layout.bottom_limit_mm() && self.y_mm > CONTINUATION_TOP_MM {
            self.pages.push(PagePlan::default());
            self.y_mm = CONTINUATION_TOP_MM;
            true
        } else {
            false
        }
    }

    fn text(&mut self, text: &str, x_mm: f32, font_pt: f32, bold: bool, color: Rgb) {
        let y_mm = self.y_mm;
        self.push(Element::Text {
            text: text.to_string(),
            x_mm,
            y_mm,
            font_pt,
            bold,
            color,
        });
    }
}

/// 出品データから文書の配置を計算
///
/// `image` は画像取得に成功した場合のみ渡す。画像の有無で表の開始位置が変わるため、
/// 呼び出し側は画像の取得（成功または断念）を終えてから呼ぶこと。
pub fn compose_document(
    listing: &Listing,
    image: Option<ImageDimensions>,
    layout: &PageLayout,
) -> DocumentPlan {
    let mut cursor = Cursor::new(layout.clone());
    let content_width = layout.content_width_mm();
    let left = layout.margin_mm;

    // 1. タイトル
    cursor.y_mm = TITLE_Y_MM;
    let title = to_builtin_text(&listing.listing_title);
    let title_lines = wrap_text(&title, TITLE_FONT_PT, content_width);
    for (i, line) in title_lines.iter().enumerate() {
        if i > 0 {
            cursor.y_mm += line_height_mm(TITLE_FONT_PT);
        }
        cursor.text(line, left, TITLE_FONT_PT, false, TABLE_BODY_TEXT);
    }
    cursor.y_mm += TITLE_ADVANCE_MM;

    // 2. 画像（取得できた場合のみ）
    if let Some(dims) = image {
        if let Some((width_mm, height_mm)) = fit_image(
            dims.pixel_width,
            dims.pixel_height,
            content_width,
            IMAGE_MAX_HEIGHT_MM,
        ) {
            cursor.push(Element::Image {
                x_mm: left,
                y_mm: cursor.y_mm,
                width_mm,
                height_mm,
            });
            cursor.y_mm += height_mm + IMAGE_GAP_MM;
        }
    }

    // 3. 表
    let rows = listing_rows(listing);
    place_table(&mut cursor, &rows);
    let table_end_mm = cursor.y_mm;

    // 4. 説明文
    cursor.y_mm += DESCRIPTION_GAP_MM;
    let line_h = line_height_mm(DESCRIPTION_FONT_PT);
    cursor.ensure_room(line_h);
    cursor.text(DESCRIPTION_LABEL, left, DESCRIPTION_FONT_PT, false, TABLE_BODY_TEXT);
    cursor.y_mm += DESCRIPTION_LABEL_ADVANCE_MM;

    let description = to_builtin_text(&listing.listing_description);
    for line in wrap_text(&description, DESCRIPTION_FONT_PT, content_width) {
        cursor.ensure_room(0.0);
        cursor.text(&line, left, DESCRIPTION_FONT_PT, false, TABLE_BODY_TEXT);
        cursor.y_mm += line_h;
    }

    DocumentPlan {
        title: listing.listing_title.clone(),
        layout: layout.clone(),
        pages: cursor.pages,
        table_end_mm,
    }
}

/// 2列の縞模様テーブルを配置（改ページ時はヘッダを再描画）
fn place_table(cursor: &mut Cursor, rows: &[FieldRow]) {
    let left = cursor.layout.margin_mm;
    let total_width = cursor.layout.content_width_mm();
    let label_width = TABLE_LABEL_COLUMN_MM;
    let value_width = total_width - label_width;
    let text_inset = TABLE_CELL_PADDING_MM;
    let line_h = line_height_mm(TABLE_FONT_PT);

    let header_height = line_h + TABLE_CELL_PADDING_MM * 2.0;
    cursor.ensure_room(header_height);
    place_header(cursor, header_height);

    for (index, row) in rows.iter().enumerate() {
        let label_lines = wrap_text(row.label, TABLE_FONT_PT, label_width - text_inset * 2.0);
        let value = to_builtin_text(&row.value);
        let value_lines = wrap_text(&value, TABLE_FONT_PT, value_width - text_inset * 2.0);
        let line_count = label_lines.len().max(value_lines.len()).max(1);
        let row_height = line_h * line_count as f32 + TABLE_CELL_PADDING_MM * 2.0;

        if cursor.ensure_room(row_height) {
            place_header(cursor, header_height);
        }

        let top = cursor.y_mm;
        if index % 2 == 0 {
            cursor.push(Element::Rect {
                x_mm: left,
                y_mm: top,
                width_mm: total_width,
                height_mm: row_height,
                fill: TABLE_ALTERNATE_FILL,
            });
        }

        for (column_x, lines) in [(left, &label_lines), (left + label_width, &value_lines)] {
            for (i, line) in lines.iter().enumerate() {
                cursor.y_mm = baseline(top, i, line_h);
                cursor.text(line, column_x + text_inset, TABLE_FONT_PT, false, TABLE_BODY_TEXT);
            }
        }

        cursor.y_mm = top + row_height;
    }
}

fn place_header(cursor: &mut Cursor, header_height: f32) {
    let left = cursor.layout.margin_mm;
    let top = cursor.y_mm;
    let line_h = line_height_mm(TABLE_FONT_PT);

    cursor.push(Element::Rect {
        x_mm: left,
        y_mm: top,
        width_mm: cursor.layout.content_width_mm(),
        height_mm: header_height,
        fill: TABLE_HEADER_FILL,
    });
    cursor.y_mm = baseline(top, 0, line_h);
    cursor.text(TABLE_HEAD[0], left + TABLE_CELL_PADDING_MM, TABLE_FONT_PT, true, TABLE_HEADER_TEXT);
    cursor.text(
        TABLE_HEAD[1],
        left + TABLE_LABEL_COLUMN_MM + TABLE_CELL_PADDING_MM,
        TABLE_FONT_PT,
        true,
        TABLE_HEADER_TEXT,
    );
    cursor.y_mm = top + header_height;
}

/// セル内 i 行目のベースライン
fn baseline(top: f32, line_index: usize, line_h: f32) -> f32 {
    top + TABLE_CELL_PADDING_MM + line_h * (line_index as f32 + 0.8)
}
