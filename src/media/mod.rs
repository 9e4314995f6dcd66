//! メディアサービス連携
//!
//! 画像の保管・検索・変換は外部サービス側の責務。
//! ここでは検索と削除のリクエスト/レスポンス契約だけを扱う。

mod cloudinary;

pub use cloudinary::{sign_params, CloudinaryClient};

use crate::error::Result;
use async_trait::async_trait;
use photo_gallery_common::{ListQuery, ListResponse};
use serde::Serialize;

/// 新しい順
pub const SORT_FIELD: &str = "created_at";
pub const SORT_DIRECTION: &str = "desc";

/// メディアサービスへの検索条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub expression: String,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl SearchQuery {
    /// 一覧用の検索式: `folder:<folder>`、検索語があれば `AND <search>`
    pub fn for_listing(folder: &str, query: &ListQuery) -> Self {
        let mut expression = format!("folder:{}", folder);
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            expression.push_str(" AND ");
            expression.push_str(search);
        }

        Self {
            expression,
            max_results: query.max_results,
            next_cursor: query.next_cursor.clone(),
        }
    }
}

#[async_trait]
pub trait MediaService: Send + Sync {
    /// 検索（作成日時の降順）
    async fn search(&self, query: &SearchQuery) -> Result<ListResponse>;

    /// 削除（CDNキャッシュも無効化）。サービスの応答をそのまま返す
    async fn destroy(&self, public_id: &str) -> Result<serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_without_search() {
        let query = SearchQuery::for_listing("gallery", &ListQuery::default());
        assert_eq!(query.expression, "folder:gallery");
        assert_eq!(query.max_results, 12);
        assert_eq!(query.next_cursor, None);
    }

    #[test]
    fn test_expression_with_search_and_cursor() {
        let list = ListQuery::new(24)
            .with_search(Some("sunset".into()))
            .with_cursor(Some("abc".into()));
        let query = SearchQuery::for_listing("gallery", &list);

        assert_eq!(query.expression, "folder:gallery AND sunset");
        assert_eq!(query.max_results, 24);
        assert_eq!(query.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_serialize_skips_missing_cursor() {
        let query = SearchQuery::for_listing("gallery", &ListQuery::default());
        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("next_cursor").is_none());
        assert_eq!(json["expression"], "folder:gallery");
    }
}
