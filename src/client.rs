//! ギャラリーAPIクライアント（CLI用）

use crate::error::{GalleryError, Result};
use photo_gallery_common::{api_error_message, DeleteRequest, ListQuery, ListResponse, PublicConfig};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Clone)]
pub struct GalleryClient {
    http: Client,
    base_url: String,
}

impl GalleryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse> {
        let response = self
            .http
            .get(format!("{}/images", self.base_url))
            .query(query)
            .send()
            .await?;

        read_json(response, "Failed to fetch images").await
    }

    pub async fn delete(&self, public_id: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .delete(format!("{}/images", self.base_url))
            .json(&DeleteRequest::new(public_id))
            .send()
            .await?;

        read_json(response, "Failed to delete image").await
    }

    pub async fn public_config(&self) -> Result<PublicConfig> {
        let response = self
            .http
            .get(format!("{}/config", self.base_url))
            .send()
            .await?;

        read_json(response, "Failed to load config").await
    }
}

/// 失敗時は本文の `{ "error": ... }` を優先し、無ければステータス文言を使う
async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown status");
        let fallback = format!("{}: {}", action, reason);
        return Err(GalleryError::Api {
            status: status.as_u16(),
            message: api_error_message(&body, &fallback),
        });
    }

    Ok(serde_json::from_str(&body)?)
}
