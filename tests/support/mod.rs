//! テスト用のインメモリ・メディアサービス

#![allow(dead_code)]

use async_trait::async_trait;
use photo_gallery::config::Config;
use photo_gallery::error::{GalleryError, Result};
use photo_gallery::media::{MediaService, SearchQuery};
use photo_gallery::server::{router, State};
use photo_gallery_common::{ImageResource, ListResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct FakeMedia {
    /// 新しい順
    images: Mutex<Vec<ImageResource>>,
    searches: Mutex<Vec<SearchQuery>>,
    destroyed: Mutex<Vec<String>>,
    pub fail_search: AtomicBool,
    pub fail_destroy: AtomicBool,
}

impl FakeMedia {
    pub fn with_images(count: usize) -> Arc<Self> {
        let media = Self::default();
        *media.images.lock().unwrap() = (1..=count).map(image).collect();
        Arc::new(media)
    }

    pub fn searches(&self) -> Vec<SearchQuery> {
        self.searches.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }
}

pub fn image(n: usize) -> ImageResource {
    let name = if n % 2 == 0 { format!("sunset-{}", n) } else { format!("beach-{}", n) };
    ImageResource {
        asset_id: format!("asset-{}", n),
        public_id: format!("gallery/{}", name),
        secure_url: format!("https://res.example.com/gallery/{}.jpg", name),
        height: 600,
        width: 800,
        display_name: name,
    }
}

#[async_trait]
impl MediaService for FakeMedia {
    async fn search(&self, query: &SearchQuery) -> Result<ListResponse> {
        self.searches.lock().unwrap().push(query.clone());

        if self.fail_search.load(Ordering::SeqCst) {
            return Err(GalleryError::MediaService {
                status: 401,
                message: "Invalid api_key secret-detail".into(),
            });
        }

        let term = query
            .expression
            .split(" AND ")
            .nth(1)
            .map(str::to_string);
        let matching: Vec<ImageResource> = self
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|img| term.as_deref().map_or(true, |t| img.display_name.contains(t)))
            .cloned()
            .collect();

        let offset = query
            .next_cursor
            .as_deref()
            .and_then(|c| c.strip_prefix("cursor-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        let end = (offset + query.max_results as usize).min(matching.len());
        let resources = matching.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        let next_cursor = (end < matching.len()).then(|| format!("cursor-{}", end));

        Ok(ListResponse {
            resources,
            next_cursor,
            total_count: matching.len() as u64,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<serde_json::Value> {
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(GalleryError::MediaService {
                status: 500,
                message: "destroy exploded".into(),
            });
        }

        self.destroyed.lock().unwrap().push(public_id.to_string());
        let mut images = self.images.lock().unwrap();
        let before = images.len();
        images.retain(|img| img.public_id != public_id);

        let result = if images.len() < before { "ok" } else { "not found" };
        Ok(serde_json::json!({ "result": result }))
    }
}

pub fn test_config() -> Config {
    Config {
        cloud_name: Some("demo".into()),
        upload_preset: Some("unsigned-preset".into()),
        ..Default::default()
    }
}

pub fn app(config: Config, media: Arc<FakeMedia>) -> axum::Router {
    router(State::new(config, media))
}

/// 実際のポートで起動し、ベースURLを返す
pub async fn spawn_server(config: Config, media: Arc<FakeMedia>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ポートの確保に失敗");
    let address = listener.local_addr().expect("アドレス取得失敗");
    let app = app(config, media);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("サーバー起動失敗");
    });

    format!("http://{}", address)
}
