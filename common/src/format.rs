//! 数値・通貨のフォーマット（en-US 表記）

/// 整数として誤差なく扱える上限（2^53）
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// `value` を `1 / unit` 単位で丸め、整数部の文字列と端数に分ける
///
/// 上限を越える値はもともと小数部を持たないので、f64 の10進表記をそのまま使う。
fn split_scaled(value: f64, unit: u64) -> (String, u64) {
    let scaled = value.abs() * unit as f64;
    if scaled < EXACT_INT_LIMIT {
        let n = scaled.round() as u64;
        ((n / unit).to_string(), n % unit)
    } else {
        (format!("{:.0}", value.abs()), 0)
    }
}

fn sign_for(value: f64, whole: &str, fraction: u64) -> &'static str {
    if value < 0.0 && (whole != "0" || fraction > 0) {
        "-"
    } else {
        ""
    }
}

/// USD通貨表記: 1234.5 → "$1,234.50"
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$NaN".to_string();
    }
    let (dollars, cents) = split_scaled(amount, 100);
    let sign = sign_for(amount, &dollars, cents);
    format!("{}${}.{:02}", sign, group_thousands(&dollars), cents)
}

/// 桁区切り付きの数値表記（小数は最大3桁）: 45210 → "45,210"
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return format_plain(value);
    }
    let (whole, fraction) = split_scaled(value, 1000);
    let sign = sign_for(value, &whole, fraction);

    let mut out = format!("{}{}", sign, group_thousands(&whole));
    if fraction > 0 {
        let digits = format!("{:03}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// 区切りなしの数値表記: 2008.0 → "2008", 3.5 → "3.5"
pub fn format_plain(value: f64) -> String {
    value.to_string()
}

/// 10進の数字列を3桁ごとに区切る
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
