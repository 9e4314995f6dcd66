//! 一覧応答のキャッシュ
//!
//! 同じクエリの一覧をTTLの間だけ保持する。削除が成功したら全て破棄し、
//! 以降の一覧取得が削除を反映するようにする。TTLが0なら何も保持しない。
//!
//! 破棄のたびに世代を進める。取得開始時の世代を `put` に渡し、
//! 取得中に破棄が挟まった応答は保存しない。

use photo_gallery_common::{ListQuery, ListResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// 保持するクエリ数の上限
pub const MAX_ENTRIES: usize = 1024;

#[derive(Default)]
struct Entries {
    generation: u64,
    map: HashMap<ListQuery, (Instant, ListResponse)>,
}

pub struct ListingCache {
    ttl: Duration,
    entries: Mutex<Entries>,
}

impl ListingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 現在の世代（メディアサービスへ問い合わせる前に読む）
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn get(&self, query: &ListQuery) -> Option<ListResponse> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = self.lock();
        let expired = match entries.map.get(query) {
            Some((stored_at, response)) if stored_at.elapsed() < self.ttl => {
                return Some(response.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.map.remove(query);
        }
        None
    }

    /// 保存する。`generation` が古ければ（取得中に破棄されていれば）何もしない
    pub fn put(&self, query: ListQuery, generation: u64, response: ListResponse) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let mut entries = self.lock();
        if entries.generation != generation {
            return false;
        }

        let ttl = self.ttl;
        entries.map.retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
        if entries.map.len() >= MAX_ENTRIES && !entries.map.contains_key(&query) {
            return false;
        }

        entries.map.insert(query, (Instant::now(), response));
        true
    }

    /// 全エントリを破棄して世代を進め、破棄した件数を返す
    pub fn invalidate(&self) -> usize {
        let mut entries = self.lock();
        entries.generation += 1;
        let count = entries.map.len();
        entries.map.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
