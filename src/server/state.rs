use std::sync::Arc;

use super::cache::ListingCache;
use crate::config::Config;
use crate::error::Result;
use crate::media::{CloudinaryClient, MediaService};

pub struct State {
    pub config: Config,
    pub media: Arc<dyn MediaService>,
    pub listing_cache: ListingCache,
}

impl State {
    /// 設定からCloudinaryクライアントを組み立てる
    pub fn from_config(config: Config) -> Result<Arc<Self>> {
        let media = Arc::new(CloudinaryClient::new(&config)?);
        Ok(Self::new(config, media))
    }

    pub fn new(config: Config, media: Arc<dyn MediaService>) -> Arc<Self> {
        let listing_cache = ListingCache::new(config.cache_ttl());

        Arc::new(Self {
            config,
            media,
            listing_cache,
        })
    }
}
