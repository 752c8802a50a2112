use crate::error::{InvoiceError, Result};
use listing_invoice_common::{ImagePolicy, RemotePattern};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://garage-backend.onrender.com";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
/// 出品画像の配信ホスト
pub const DEFAULT_IMAGE_HOST: &str = "tckhzquklzptybofowyk.supabase.co";

pub const ENV_BACKEND_URL: &str = "LISTING_INVOICE_BACKEND_URL";
pub const ENV_PROXY_URL: &str = "LISTING_INVOICE_PROXY_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    /// 起動済みプロキシのベースURL（未設定なら generate がプロセス内で起動）
    #[serde(default)]
    pub proxy_url: Option<String>,
    pub bind_address: String,
    /// 未設定ならHTTPクライアントの既定値
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub image_policy: ImagePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            proxy_url: None,
            bind_address: DEFAULT_BIND_ADDRESS.into(),
            request_timeout_seconds: None,
            image_policy: ImagePolicy::new(vec![RemotePattern::https(DEFAULT_IMAGE_HOST)]),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書き
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InvoiceError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("listing-invoice").join("config.json"))
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_BACKEND_URL) {
            if !url.is_empty() {
                self.backend_url = url;
            }
        }
        if let Ok(url) = std::env::var(ENV_PROXY_URL) {
            if !url.is_empty() {
                self.proxy_url = Some(url);
            }
        }
    }

    /// getListing のエンドポイント
    pub fn listing_endpoint(&self) -> String {
        format!("{}/getListing", self.backend_url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// 設定値に合わせたHTTPクライアント
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    pub fn set_backend_url(&mut self, url: String) -> Result<()> {
        self.backend_url = url.clone();
        Self::update_file(&Self::config_path()?, |stored| stored.backend_url = url)
    }

    pub fn set_proxy_url(&mut self, url: String) -> Result<()> {
        self.proxy_url = Some(url.clone());
        Self::update_file(&Self::config_path()?, |stored| stored.proxy_url = Some(url))
    }

    /// ファイル上の値だけを読み直して1項目を書き換える
    ///
    /// `load()` の結果には環境変数の値が混ざっているため、それをそのまま保存しない。
    fn update_file(path: &std::path::Path, edit: impl FnOnce(&mut Config)) -> Result<()> {
        let mut stored = Self::load_from(path)?;
        edit(&mut stored);
        stored.save_to(path)
    }
}
