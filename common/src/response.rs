//! getListing レスポンスの解釈
//!
//! ステータスコードと本文から FetchResult を決める。I/O を含まないので
//! 全分岐をネットワークなしで検証できる。

use crate::error::Result;
use crate::types::{ApiError, ApiResponse, FetchResult, Listing};
use serde_json::Value;

/// リスティングが見つからなかった場合のメッセージ
pub const LISTING_NOT_FOUND_MESSAGE: &str = "Listing data not found in the response.";

/// 非2xxで message が無い場合のメッセージ
pub fn status_failure_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

/// 通信エラー時のメッセージ
pub fn transport_failure_message(detail: &str) -> String {
    format!("An error occurred: {}", detail)
}

/// 本文をJSONとして読む（読めなければ None）
pub fn parse_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// listing オブジェクトを型に変換
pub fn decode_listing(value: Value) -> Result<Listing> {
    Ok(serde_json::from_value(value)?)
}

/// レスポンスを解釈
///
/// `body` は JSON として解釈できなかった場合 None。
pub fn interpret_response(status: u16, body: Option<Value>) -> FetchResult {
    let success = (200..300).contains(&status);

    if !success {
        let message = body
            .and_then(|v| serde_json::from_value::<ApiError>(v).ok())
            .and_then(|e| e.message)
            .and_then(truthy_message);
        return FetchResult::Failed(message.unwrap_or_else(|| status_failure_message(status)));
    }

    let response = body
        .and_then(|v| serde_json::from_value::<ApiResponse>(v).ok())
        .unwrap_or_default();

    if let Some(error) = response.error.and_then(truthy_message) {
        return FetchResult::Failed(error);
    }

    match response.result.and_then(|r| r.listing) {
        Some(value) if value.is_object() => match decode_listing(value) {
            Ok(listing) => FetchResult::Listing(listing),
            Err(_) => FetchResult::Failed(LISTING_NOT_FOUND_MESSAGE.to_string()),
        },
        _ => FetchResult::Failed(LISTING_NOT_FOUND_MESSAGE.to_string()),
    }
}

/// 空でない値をメッセージ文字列にする（文字列以外はJSON表記）
fn truthy_message(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
