//! カーソル方式のページング
//!
//! メディアサービスは「次ページ」用の不透明なカーソルしか返さないため、
//! ページN+1を取得するにはページNの取得結果に含まれるカーソルが必要になる。

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// 総ページ数（0件なら0ページ）
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if total_count == 0 || page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// ページ番号ボタンの一覧
pub fn page_numbers(total_pages: u32) -> RangeInclusive<u32> {
    1..=total_pages
}

/// カーソル解決結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorLookup<'a> {
    /// 1ページ目はカーソル不要
    FirstPage,
    /// 前ページの取得で得たカーソル
    Known(&'a str),
    /// 前ページが未取得（リセット直後など）
    Missing,
}

impl<'a> CursorLookup<'a> {
    pub fn token(&self) -> Option<&'a str> {
        match self {
            CursorLookup::Known(token) => Some(token),
            _ => None,
        }
    }
}

/// ページ番号 → 次ページ用カーソル
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursors {
    cursors: BTreeMap<u32, String>,
}

impl PageCursors {
    pub fn new() -> Self {
        Self::default()
    }

    /// `page` を取得するためのカーソル（ページ `page - 1` に記録されたもの）
    pub fn cursor_for(&self, page: u32) -> CursorLookup<'_> {
        if page <= 1 {
            return CursorLookup::FirstPage;
        }
        match self.cursors.get(&(page - 1)) {
            Some(token) => CursorLookup::Known(token),
            None => CursorLookup::Missing,
        }
    }

    /// `page` の取得結果で返ってきたカーソルを記録（上書き）
    pub fn record(&mut self, page: u32, cursor: impl Into<String>) {
        self.cursors.insert(page, cursor.into());
    }

    pub fn get(&self, page: u32) -> Option<&str> {
        self.cursors.get(&page).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.cursors.clear();
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
