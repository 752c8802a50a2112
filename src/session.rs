//! 1回の操作セッションの状態
//!
//! 入力URL・エラー表示・読み込み中フラグ・取得済み出品を保持する。
//! 送信ごとにチケットを発行し、古いチケットの結果は捨てる。

use crate::fetcher::ListingClient;
use listing_invoice_common::{
    clears_error_on_input, validate_listing_url, FetchResult, Listing, ListingId,
    INVALID_URL_MESSAGE,
};
use tracing::debug;

/// 送信番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// 受理された送信
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub id: ListingId,
}

#[derive(Debug, Default)]
pub struct InvoiceSession {
    url: String,
    error: String,
    loading: bool,
    listing: Option<Listing>,
    generation: u64,
}

impl InvoiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 表示中のエラー（なければ空文字）
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.url.is_empty()
    }

    /// URL入力の変更
    pub fn set_url(&mut self, input: impl Into<String>) {
        self.url = input.into();
        if !self.error.is_empty() && clears_error_on_input(&self.url) {
            self.error.clear();
        }
    }

    /// 送信開始
    ///
    /// 読み込み中は受け付けない。URLが不正ならエラーを設定して None。
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.loading {
            debug!("submission ignored while loading");
            return None;
        }

        self.loading = true;
        self.error.clear();
        self.listing = None;

        let Some(id) = validate_listing_url(&self.url) else {
            self.error = INVALID_URL_MESSAGE.to_string();
            self.loading = false;
            return None;
        };

        self.generation += 1;
        Some(Submission {
            ticket: Ticket(self.generation),
            id,
        })
    }

    /// 取得結果を反映
    ///
    /// 最新チケット以外の結果は無視して false を返す。
    pub fn complete(&mut self, ticket: Ticket, result: FetchResult) -> bool {
        if ticket.0 != self.generation {
            debug!(stale = ticket.0, current = self.generation, "discarding superseded result");
            return false;
        }

        match result {
            FetchResult::Listing(listing) => {
                self.listing = Some(listing);
                self.error.clear();
            }
            FetchResult::Failed(message) => {
                self.listing = None;
                self.error = message;
            }
        }
        self.loading = false;
        true
    }

    /// 検証から取得・反映までを一括実行
    pub async fn submit(&mut self, client: &ListingClient) {
        if let Some(submission) = self.begin_submit() {
            let result = client.fetch(&submission.id).await;
            self.complete(submission.ticket, result);
        }
    }

    /// 新しい送信を受け付けられるよう読み込み中を解除する
    ///
    /// 発行済みチケットは無効になる。
    pub fn cancel(&mut self) {
        if self.loading {
            self.generation += 1;
            self.loading = false;
        }
    }
}
