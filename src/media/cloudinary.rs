//! Cloudinary Admin/Upload API クライアント
//!
//! - 検索: `POST {base}/{cloud}/resources/search`（Basic認証）
//! - 削除: `POST {base}/{cloud}/image/destroy`（SHA-256署名付きフォーム）

use super::{MediaService, SearchQuery, SORT_DIRECTION, SORT_FIELD};
use crate::config::{Config, Credentials};
use crate::error::{GalleryError, Result};
use async_trait::async_trait;
use photo_gallery_common::ListResponse;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::debug;

pub struct CloudinaryClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
}

/// エラー応答 `{ "error": { "message": "..." } }`
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            credentials: config.credentials()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.credentials.cloud_name, path)
    }

    async fn read_json(response: Response) -> Result<serde_json::Value> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GalleryError::MediaService {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MediaService for CloudinaryClient {
    async fn search(&self, query: &SearchQuery) -> Result<ListResponse> {
        let mut body = json!({
            "expression": query.expression,
            "sort_by": [{ SORT_FIELD: SORT_DIRECTION }],
            "max_results": query.max_results,
        });
        if let Some(cursor) = &query.next_cursor {
            body["next_cursor"] = json!(cursor);
        }

        debug!(expression = %query.expression, cursor = ?query.next_cursor, "media search");

        let response = self
            .http
            .post(self.endpoint("resources/search"))
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .json(&body)
            .send()
            .await?;

        let value = Self::read_json(response).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn destroy(&self, public_id: &str) -> Result<serde_json::Value> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("invalidate", "true".to_string()),
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
        ];
        let signature = sign_params(&signed, &self.credentials.api_secret);

        let mut form: Vec<(&str, String)> = signed.to_vec();
        form.push(("api_key", self.credentials.api_key.clone()));
        form.push(("signature", signature));
        form.push(("signature_algorithm", "sha256".to_string()));

        debug!(public_id, "media destroy");

        let response = self
            .http
            .post(self.endpoint("image/destroy"))
            .form(&form)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

/// パラメータ署名
///
/// キー順に `k=v` を `&` で連結し、APIシークレットを付けてSHA-256（16進）。
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_sign_params_known_value() {
        let signature = sign_params(
            &params(&[
                ("public_id", "gallery/sunset"),
                ("timestamp", "1315060510"),
                ("invalidate", "true"),
            ]),
            "abcd",
        );
        assert_eq!(
            signature,
            "de154c3bc2cdc235413b2395ade78d2b88808df1ca0fd0658ed3ef9cf88dc6f5"
        );
    }

    #[test]
    fn test_sign_params_order_independent() {
        let a = sign_params(&params(&[("a", "1"), ("b", "2")]), "s");
        let b = sign_params(&params(&[("b", "2"), ("a", "1")]), "s");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_sign_params_skips_empty_values() {
        let a = sign_params(&params(&[("a", "1"), ("b", "")]), "s");
        let b = sign_params(&params(&[("a", "1")]), "s");
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_requires_credentials() {
        let result = CloudinaryClient::new(&Config::default());
        assert!(matches!(result, Err(GalleryError::MissingCredential(..))));
    }

    #[test]
    fn test_endpoint() {
        let config = Config {
            cloud_name: Some("demo".into()),
            api_key: Some("key".into()),
            api_secret: Some("secret".into()),
            api_base_url: "http://localhost:9000/v1_1/".into(),
            ..Default::default()
        };
        let client = CloudinaryClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("resources/search"),
            "http://localhost:9000/v1_1/demo/resources/search"
        );
    }
}
