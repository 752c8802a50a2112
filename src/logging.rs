//! ログ初期化
//!
//! `RUST_LOG` があればそれを優先し、なければ `-v` の有無で info / debug を選ぶ。

use tracing_subscriber::EnvFilter;

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "listing_invoice=debug,listing_invoice_common=debug,info"
    } else {
        "info"
    }
}

pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // テストなどで二重に初期化された場合は既存の設定を使う
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
