//! listing-invoice
//!
//! Garageの出品URLを検証して出品データを取得し、カード表示と請求書PDFの生成を行う。
//! PDFへ埋め込む画像は画像プロキシ経由で取得する。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod logging;
pub mod proxy;
pub mod renderer;
pub mod session;
