//! 出品URLの検証
//!
//! `https://www.withgarage.com/listing/<slug>-<uuid>` 形式のみ受け付け、
//! 末尾36文字のIDを取り出す。エラー状態の設定は呼び出し側の責務。

use crate::types::ListingId;
use regex::Regex;

/// 出品URLの固定プレフィックス
pub const LISTING_URL_PREFIX: &str = "https://www.withgarage.com/listing/";

/// 検証失敗時にユーザーへ表示するメッセージ
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid Garage listing URL.";

lazy_static::lazy_static! {
    static ref LISTING_URL_RE: Regex = Regex::new(
        r"^https://www\.withgarage\.com/listing/.+-([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})$"
    ).unwrap();
}

/// URLを検証してIDを返す
///
/// 前後の空白・別プロトコル・別ホスト・ID欠落はすべて `None`。
pub fn validate_listing_url(input: &str) -> Option<ListingId> {
    LISTING_URL_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| ListingId::new(m.as_str()))
}

/// 入力変更時に既存のエラー表示を消すべきか
///
/// 空欄に戻したとき、または正しいプレフィックスで打ち直し始めたときに消す。
pub fn clears_error_on_input(input: &str) -> bool {
    input.is_empty() || input.starts_with(LISTING_URL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    fn url(slug: &str) -> String {
        format!("{}{}-{}", LISTING_URL_PREFIX, slug, ID)
    }

    #[test]
    fn test_valid_url_returns_trailing_id() {
        let id = validate_listing_url(&url("2008-pierce-pumper")).unwrap();
        assert_eq!(id.as_str(), ID);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_slug_containing_hex_still_extracts_last_segment() {
        let id = validate_listing_url(&url("e-one-aaaa-bbbb")).unwrap();
        assert_eq!(id.as_str(), ID);
    }

    #[test]
    fn test_whitespace_is_rejected() {
        assert!(validate_listing_url(&format!(" {}", url("truck"))).is_none());
        assert!(validate_listing_url(&format!("{} ", url("truck"))).is_none());
        assert!(validate_listing_url(&format!("{}\n", url("truck"))).is_none());
    }

    #[test]
    fn test_wrong_protocol_or_host_is_rejected() {
        let http = url("truck").replacen("https://", "http://", 1);
        assert!(validate_listing_url(&http).is_none());
        assert!(validate_listing_url(&format!("https://withgarage.com/listing/truck-{}", ID)).is_none());
        assert!(validate_listing_url(&format!("https://www.example.com/listing/truck-{}", ID)).is_none());
        assert!(validate_listing_url(&format!("https://www.withgarage.com/item/truck-{}", ID)).is_none());
    }

    #[test]
    fn test_missing_or_malformed_id_is_rejected() {
        assert!(validate_listing_url("").is_none());
        assert!(validate_listing_url(LISTING_URL_PREFIX).is_none());
        assert!(validate_listing_url(&format!("{}truck", LISTING_URL_PREFIX)).is_none());
        // スラッグなし
        assert!(validate_listing_url(&format!("{}{}", LISTING_URL_PREFIX, ID)).is_none());
        // 大文字・桁不足
        assert!(validate_listing_url(&url("truck").to_uppercase()).is_none());
        assert!(validate_listing_url(&format!("{}truck-{}", LISTING_URL_PREFIX, &ID[1..])).is_none());
        assert!(validate_listing_url(&format!("{}truck-{}", LISTING_URL_PREFIX, ID.replace('-', "0"))).is_none());
    }

    #[test]
    fn test_trailing_path_or_query_is_rejected() {
        assert!(validate_listing_url(&format!("{}/", url("truck"))).is_none());
        assert!(validate_listing_url(&format!("{}?ref=home", url("truck"))).is_none());
    }

    /// 受理されたなら、IDは入力の末尾36文字と一致する
    fn assert_consistent(input: &str) {
        if let Some(id) = validate_listing_url(input) {
            assert!(input.starts_with(LISTING_URL_PREFIX), "accepted {:?}", input);
            assert!(input.ends_with(id.as_str()), "accepted {:?}", input);
            assert_eq!(id.as_str().len(), 36);
        }
    }

    #[test]
    fn test_every_truncation_is_rejected() {
        let valid = url("2008-pierce-pumper");
        for end in 0..valid.len() {
            let truncated = &valid[..end];
            assert!(validate_listing_url(truncated).is_none(), "accepted {:?}", truncated);
        }
    }

    #[test]
    fn test_case_flips_only_survive_in_slug() {
        let slug = "2008-Pierce-pumper";
        let valid = url(slug);
        let slug_range = LISTING_URL_PREFIX.len()..LISTING_URL_PREFIX.len() + slug.len();

        for (i, c) in valid.char_indices().filter(|(_, c)| c.is_ascii_alphabetic()) {
            let flipped = if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            let mut mutated = valid.clone();
            mutated.replace_range(i..i + 1, &flipped.to_string());

            assert_eq!(
                validate_listing_url(&mutated).is_some(),
                slug_range.contains(&i),
                "flip at {} in {:?}",
                i,
                mutated
            );
        }
    }

    #[test]
    fn test_mutated_inputs_never_misreport_id() {
        const ALPHABET: &[char] = &['a', 'f', 'g', 'A', '0', '9', '-', '/', ' ', '?', '\u{00E9}', '\u{6F22}'];
        let valid = url("e-one-rescue");
        let chars: Vec<char> = valid.chars().collect();

        // 決定的な線形合同法で置換・削除・挿入を作る
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = |bound: usize| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) as usize) % bound
        };

        for _ in 0..2000 {
            let mut mutated = chars.clone();
            let pos = next(mutated.len());
            match next(3) {
                0 => mutated[pos] = ALPHABET[next(ALPHABET.len())],
                1 => {
                    mutated.remove(pos);
                }
                _ => mutated.insert(pos, ALPHABET[next(ALPHABET.len())]),
            }
            let input: String = mutated.into_iter().collect();
            assert_consistent(&input);
        }

        assert_consistent(&valid);
    }

    #[test]
    fn test_clears_error_on_input() {
        assert!(clears_error_on_input(""));
        assert!(clears_error_on_input("https://www.withgarage.com/listing/"));
        assert!(clears_error_on_input(&url("truck")));
        assert!(!clears_error_on_input("https://www.withgarage"));
        assert!(!clears_error_on_input("garbage"));
    }
}
