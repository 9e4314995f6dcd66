//! ギャラリー状態コントローラ
//!
//! 表示中のページを「現在の意図」（デバウンス済み検索語 + ページ番号）と
//! 一致させ続けるための状態機械。I/Oは行わない。
//!
//! - 状態を変える操作は、取得が必要なときに [`FetchRequest`] を返す
//! - ホストは一覧APIを呼び、結果を [`GalleryController::complete`] に渡す
//! - 取得ごとに連番を振り、最後に発行した取得の結果だけを反映する
//!   （遅れて届いた古い応答で新しい表示が上書きされない）
//!
//! 前ページのカーソルが無い状態でページN(>1)を要求した場合は、
//! カーソル無しでそのまま取得する（`cursor_missing` が立つ）。

use crate::debounce::{DebounceTicket, Debouncer};
use crate::pagination::{self, CursorLookup, PageCursors};
use crate::types::{ImageResource, ListQuery, ListResponse};
use std::ops::RangeInclusive;
use std::time::Duration;

/// 発行すべき一覧取得
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// 発行順の連番（完了時に [`GalleryController::complete`] へ渡す）
    pub seq: u64,
    pub page: u32,
    /// デバウンス済み検索語
    pub term: String,
    pub query: ListQuery,
    /// ページ>1なのに前ページのカーソルが無かった
    pub cursor_missing: bool,
}

/// 取得結果の反映結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// より新しい取得が発行済みのため破棄した
    Stale,
}

/// 描画すべき画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryView<'a> {
    /// 初回読み込み中（表示できる画像が無い）
    Loading,
    Failed(&'a str),
    /// 画像0件
    Empty,
    Grid(&'a [ImageResource]),
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: u64,
    page: u32,
}

#[derive(Debug, Clone)]
pub struct GalleryController {
    page_size: u32,
    current_page: u32,
    images: Vec<ImageResource>,
    total_count: u64,
    loading: bool,
    error: Option<String>,
    cursors: PageCursors,
    search_input: String,
    debounced_term: String,
    debouncer: Debouncer<String>,
    last_seq: u64,
    in_flight: Option<InFlight>,
}

impl Default for GalleryController {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PAGE_SIZE)
    }
}

impl GalleryController {
    pub fn new(page_size: u32) -> Self {
        Self::with_debounce(page_size, crate::SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(page_size: u32, delay: Duration) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            images: Vec::new(),
            total_count: 0,
            loading: false,
            error: None,
            cursors: PageCursors::new(),
            search_input: String::new(),
            debounced_term: String::new(),
            debouncer: Debouncer::new(delay),
            last_seq: 0,
            in_flight: None,
        }
    }

    /// 初回表示: 検索語なしで1ページ目を取得
    pub fn start(&mut self) -> FetchRequest {
        self.current_page = 1;
        self.cursors.clear();
        self.begin_fetch()
    }

    /// 検索ボックスの入力。`debounce_delay()` 後に `settle_search` を呼ぶこと
    pub fn edit_search(&mut self, raw: impl Into<String>) -> DebounceTicket {
        let raw = raw.into();
        self.search_input = raw.clone();
        self.debouncer.push(raw)
    }

    /// デバウンスタイマー発火
    ///
    /// 最新の入力が確定し、かつ値が変わった場合だけページを1に戻し、
    /// カーソルを全て破棄して取得を発行する。
    pub fn settle_search(&mut self, ticket: DebounceTicket) -> Option<FetchRequest> {
        let term = self.debouncer.fire(ticket)?;
        if term == self.debounced_term {
            return None;
        }

        self.debounced_term = term;
        self.current_page = 1;
        self.cursors.clear();
        Some(self.begin_fetch())
    }

    /// ページサイズの変更（起動後にサーバー設定が届いたとき）
    ///
    /// 入力中の検索語と保留中のデバウンスは保ったまま、
    /// 変わった場合だけページを1に戻してカーソルを破棄する。
    pub fn set_page_size(&mut self, page_size: u32) {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return;
        }

        self.page_size = page_size;
        self.current_page = 1;
        self.cursors.clear();
    }

    /// ページ番号クリック。現在ページ・読み込み中は何もしない
    pub fn click_page(&mut self, page: u32) -> Option<FetchRequest> {
        if page == 0 || page == self.current_page || self.loading {
            return None;
        }

        self.current_page = page;
        Some(self.begin_fetch())
    }

    /// 削除成功後: 現在の（ページ, 検索語）を再取得する
    ///
    /// ページが空になっても前のページへは戻さない。
    pub fn image_deleted(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    /// 取得完了
    pub fn complete(&mut self, seq: u64, result: Result<ListResponse, String>) -> FetchOutcome {
        let Some(in_flight) = self.in_flight.filter(|f| f.seq == seq) else {
            return FetchOutcome::Stale;
        };
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(response) => {
                self.images = response.resources;
                self.total_count = response.total_count;
                if let Some(cursor) = response.next_cursor.filter(|c| !c.is_empty()) {
                    self.cursors.record(in_flight.page, cursor);
                }
            }
            Err(message) => {
                self.images.clear();
                self.total_count = 0;
                self.cursors.clear();
                self.error = Some(message);
            }
        }

        FetchOutcome::Applied
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.last_seq += 1;
        let seq = self.last_seq;
        let page = self.current_page;

        let lookup = self.cursors.cursor_for(page);
        let cursor_missing = lookup == CursorLookup::Missing;
        let query = ListQuery::new(self.page_size)
            .with_cursor(lookup.token().map(str::to_string))
            .with_search(Some(self.debounced_term.clone()));

        self.loading = true;
        self.error = None;
        self.in_flight = Some(InFlight { seq, page });

        FetchRequest {
            seq,
            page,
            term: self.debounced_term.clone(),
            query,
            cursor_missing,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn images(&self) -> &[ImageResource] {
        &self.images
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total_count, self.page_size)
    }

    pub fn page_numbers(&self) -> RangeInclusive<u32> {
        pagination::page_numbers(self.total_pages())
    }

    /// ページ送りは2ページ以上あるときだけ表示
    pub fn show_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cursors(&self) -> &PageCursors {
        &self.cursors
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn debounced_term(&self) -> &str {
        &self.debounced_term
    }

    pub fn results_heading(&self) -> Option<String> {
        if self.debounced_term.is_empty() {
            None
        } else {
            Some(format!("Results for \"{}\"", self.debounced_term))
        }
    }

    pub fn empty_message(&self) -> String {
        if self.debounced_term.is_empty() {
            "No images found".to_string()
        } else {
            format!("No images found matching \"{}\"", self.debounced_term)
        }
    }

    pub fn view(&self) -> GalleryView<'_> {
        if self.loading && self.images.is_empty() {
            GalleryView::Loading
        } else if let Some(error) = &self.error {
            GalleryView::Failed(error)
        } else if self.images.is_empty() {
            GalleryView::Empty
        } else {
            GalleryView::Grid(&self.images)
        }
    }
}
