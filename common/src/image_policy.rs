//! 画像ホストの許可リスト
//!
//! カード表示で画像URLをプレビュー対象にしてよいかを判定する宣言的な設定。
//! プロキシ側では検査しない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// 許可する画像URLのパターン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePattern {
    pub protocol: String,
    pub hostname: String,
    /// 空ならポート指定なしのみ許可
    #[serde(default)]
    pub port: String,
    /// `/**` で全パス、`/prefix/**` で前方一致、それ以外は完全一致
    #[serde(default = "default_pathname")]
    pub pathname: String,
}

fn default_pathname() -> String {
    "/**".to_string()
}

impl RemotePattern {
    pub fn https(hostname: &str) -> Self {
        Self {
            protocol: "https".to_string(),
            hostname: hostname.to_string(),
            port: String::new(),
            pathname: default_pathname(),
        }
    }

    fn matches(&self, url: &Url) -> bool {
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        self.protocol.eq_ignore_ascii_case(url.scheme())
            && url
                .host_str()
                .is_some_and(|host| self.hostname.eq_ignore_ascii_case(host))
            && self.port == port
            && path_matches(&self.pathname, url.path())
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => path == prefix || path.starts_with(&format!("{}/", prefix)),
        None => pattern == path,
    }
}

/// 画像URLの判定
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImagePolicy {
    #[serde(default)]
    pub remote_patterns: Vec<RemotePattern>,
}

impl ImagePolicy {
    pub fn new(remote_patterns: Vec<RemotePattern>) -> Self {
        Self { remote_patterns }
    }

    /// URLが許可リストに含まれるか
    pub fn permits(&self, url: &str) -> Result<bool> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(self.remote_patterns.iter().any(|p| p.matches(&parsed)))
    }
}
