use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "listing-invoice")]
#[command(about = "Garageの出品URLから請求書PDFを生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 出品URLから請求書PDFを生成
    Generate {
        /// 出品URL (https://www.withgarage.com/listing/...)
        #[arg(required = true)]
        url: String,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 確認せずにPDFを保存
        #[arg(short = 'y', long)]
        yes: bool,

        /// 画像プロキシのベースURL（省略時は設定値、未設定ならプロセス内で起動）
        #[arg(long)]
        proxy_url: Option<String>,
    },

    /// 出品URLを検証してIDを表示
    Validate {
        #[arg(required = true)]
        url: String,
    },

    /// 画像プロキシを起動
    Serve {
        /// 待ち受けアドレス（デフォルト: 設定値）
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_backend_url: Option<String>,

        /// 画像プロキシURLを設定
        #[arg(long)]
        set_proxy_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
