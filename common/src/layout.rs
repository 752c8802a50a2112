//! レイアウト設定モジュール
//!
//! mm基準のレイアウト定義。y座標はすべて「ページ上端からの距離」で持ち、
//! PDF座標（下端原点）への変換は描画側で行う。

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 左右余白（mm）
pub const MARGIN_MM: f32 = 14.0;
/// 下端余白（mm）。これを越える行は改ページ
pub const BOTTOM_MARGIN_MM: f32 = 14.0;
/// 改ページ後の開始位置（mm）
pub const CONTINUATION_TOP_MM: f32 = 20.0;

/// タイトル
pub const TITLE_Y_MM: f32 = 22.0;
pub const TITLE_FONT_PT: f32 = 18.0;
pub const TITLE_ADVANCE_MM: f32 = 10.0;

/// 画像の高さ上限（mm）と画像下の余白
pub const IMAGE_MAX_HEIGHT_MM: f32 = 80.0;
pub const IMAGE_GAP_MM: f32 = 10.0;

/// 表
pub const TABLE_FONT_PT: f32 = 10.0;
pub const TABLE_CELL_PADDING_MM: f32 = 3.0;
pub const TABLE_LABEL_COLUMN_MM: f32 = 60.0;
pub const TABLE_HEADER_FILL: Rgb = Rgb(0, 51, 102);
pub const TABLE_HEADER_TEXT: Rgb = Rgb(255, 255, 255);
pub const TABLE_ALTERNATE_FILL: Rgb = Rgb(245, 245, 245);
pub const TABLE_BODY_TEXT: Rgb = Rgb(0, 0, 0);

/// 説明文
pub const DESCRIPTION_GAP_MM: f32 = 10.0;
pub const DESCRIPTION_LABEL_ADVANCE_MM: f32 = 6.0;
pub const DESCRIPTION_FONT_PT: f32 = 12.0;

/// 行送り係数（フォントサイズに対する倍率）
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// 8bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// 0.0-1.0 の成分に変換
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// ページ設定
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub bottom_margin_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageLayout {
    pub fn a4() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            bottom_margin_mm: BOTTOM_MARGIN_MM,
        }
    }

    /// 本文幅（mm）
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    /// これ以上下に描くと改ページ（上端からのmm）
    pub fn bottom_limit_mm(&self) -> f32 {
        self.page_height_mm - self.bottom_margin_mm
    }
}

// ============================================
// ヘルパー関数
// ============================================

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// フォントサイズ（pt）から行送り（mm）
#[inline]
pub fn line_height_mm(font_pt: f32) -> f32 {
    pt_to_mm(font_pt * LINE_HEIGHT_FACTOR)
}

/// 画像を幅・高さの上限に収める（縦横比維持）
///
/// まず幅いっぱいに合わせ、高さが上限を越える場合は高さ基準で縮める。
/// 画素サイズが0の場合は None。
pub fn fit_image(
    pixel_width: u32,
    pixel_height: u32,
    max_width_mm: f32,
    max_height_mm: f32,
) -> Option<(f32, f32)> {
    if pixel_width == 0 || pixel_height == 0 {
        return None;
    }
    let (w, h) = (pixel_width as f32, pixel_height as f32);
    let height_at_full_width = h * max_width_mm / w;
    let height = height_at_full_width.min(max_height_mm);
    let width = w * height / h;
    Some((width, height))
}
