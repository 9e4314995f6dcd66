//! ギャラリーAPIの型定義
//!
//! サーバー・ネイティブクライアント・Web(WASM)で共有される型:
//! - ImageResource: メディアサービスから取得した画像1件
//! - ListQuery / ListResponse: `GET /images` の入出力
//! - DeleteRequest / ErrorBody: `DELETE /images` とエラー応答
//! - PublicConfig: ブラウザに公開してよい設定（アップロードウィジェット用）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 1ページあたりの表示枚数
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// メディアサービス側の検索上限
pub const MAX_RESULTS_LIMIT: u32 = 500;

/// ギャラリー画像
///
/// メディアサービスの応答から必要なフィールドだけを取り出す。
/// 未知のフィールドは無視する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    /// 不変のアセットID（一覧のキーに使う）
    pub asset_id: String,
    /// 削除に使うパブリックID
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub display_name: String,
}

impl ImageResource {
    /// 表示名（未設定ならパブリックID）
    pub fn title(&self) -> &str {
        if self.display_name.is_empty() {
            &self.public_id
        } else {
            &self.display_name
        }
    }

    /// "W × H" 形式のサイズ表記
    pub fn dimensions(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }
}

/// 一覧取得パラメータ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub max_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_PAGE_SIZE,
            next_cursor: None,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn new(max_results: u32) -> Self {
        Self {
            max_results,
            ..Default::default()
        }
    }

    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.next_cursor = cursor.filter(|c| !c.is_empty());
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }

    /// クエリ文字列の生の値から検証済みのクエリを作る
    ///
    /// 空文字の `next_cursor` / `search` は未指定として扱う。
    pub fn parse(
        max_results: Option<&str>,
        next_cursor: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self> {
        let max_results = match max_results.map(str::trim).filter(|s| !s.is_empty()) {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_RESULTS_LIMIT).contains(n))
                .ok_or_else(|| {
                    Error::Validation(format!(
                        "max_results must be an integer between 1 and {}",
                        MAX_RESULTS_LIMIT
                    ))
                })?,
        };

        Ok(Self::new(max_results)
            .with_cursor(next_cursor.map(str::to_string))
            .with_search(search.map(str::to_string)))
    }
}

/// 一覧取得の応答
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub resources: Vec<ImageResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub total_count: u64,
}

/// 削除リクエスト本文
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: Option<String>,
}

impl DeleteRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    /// 空でないIDだけを返す
    pub fn image_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// エラー応答本文 `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// ブラウザ向けに公開する設定（秘密情報は含めない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicConfig {
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default)]
    pub upload_preset: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// エラー応答からメッセージを取り出す
///
/// 本文が `{ "error": "..." }` ならそのメッセージ、それ以外は `fallback`。
pub fn api_error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
