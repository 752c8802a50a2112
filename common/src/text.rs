//! テキスト幅計算と折り返し
//!
//! PDFの組み込みHelveticaにはメトリクスが付属しないため、
//! 標準AFMの文字幅（1000単位）で計算する。

use crate::layout::pt_to_mm;

/// Helvetica の文字幅（0x20..=0x7E）
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica の文字幅（0xA0..=0xFF、WinAnsiEncoding の Latin-1 部分）
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // eth..ydieresis
];

const FALLBACK_WIDTH: u16 = 556;

fn char_width(c: char) -> u16 {
    let code = c as u32;
    match code {
        0x20..=0x7E => HELVETICA_WIDTHS[(code - 0x20) as usize],
        0xA0..=0xFF => HELVETICA_LATIN1_WIDTHS[(code - 0xA0) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// 文字列の描画幅（mm）
pub fn text_width_mm(text: &str, font_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    pt_to_mm(units as f32 * font_pt / 1000.0)
}

/// 組み込みフォントで描ける文字だけに置き換える
///
/// 組み込みフォントは WinAnsiEncoding で出力される。ASCII と Latin-1 はそのまま残し、
/// 引用符やダッシュはASCIIに寄せ、それ以外は `?` にする。
pub fn to_builtin_text(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r')
        .map(|c| match c {
            '\t' => ' ',
            '\u{2018}' | '\u{2019}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{2033}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2022}' => '*',
            '\u{00A0}' => ' ',
            c if c == '\n' || (' '..='~').contains(&c) || ('\u{00A1}'..='\u{00FF}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// 最大幅（mm）で折り返す
///
/// 改行は段落区切りとして保持する。1語が最大幅を越える場合のみ語の途中で分割する。
pub fn wrap_text(text: &str, font_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, font_pt) <= max_width_mm {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width_mm(word, font_pt) <= max_width_mm {
                current = word.to_string();
            } else {
                let mut pieces = split_long_word(word, font_pt, max_width_mm);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    lines
}

fn split_long_word(word: &str, font_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if text_width_mm(&current, font_pt) > max_width_mm && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    pieces.push(current);
    pieces
}
