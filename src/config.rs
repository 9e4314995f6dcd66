use crate::error::{GalleryError, Result};
use photo_gallery_common::{PublicConfig, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// ブラウザからの署名なしアップロード用プリセット
    pub upload_preset: Option<String>,
    /// 一覧対象のフォルダ
    pub folder: String,
    pub port: u16,
    pub page_size: u32,
    pub api_base_url: String,
    /// 一覧応答のキャッシュ秒数（0で無効）
    pub cache_seconds: u64,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            upload_preset: None,
            folder: "gallery".into(),
            port: 3000,
            page_size: DEFAULT_PAGE_SIZE,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            cache_seconds: 0,
            timeout_seconds: 30,
        }
    }
}

/// メディアサービスの認証情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    /// 設定ファイル → 環境変数の順に読み込む
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.apply_env(|key| std::env::var(key).ok()))
    }

    /// 読み込めなければ警告してデフォルトを使う（サーバーを起動しないコマンド用）
    pub fn load_or_default() -> Self {
        let config = match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                warn!("{e}, using default config");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("Failed to load {}: {e}, using default config", path.display());
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-gallery").join("config.json"))
    }

    /// 環境変数で上書きする
    ///
    /// `lookup` を差し替えればプロセス環境を触らずにテストできる。
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = text("CLOUDINARY_CLOUD_NAME") {
            self.cloud_name = Some(v);
        }
        if let Some(v) = text("CLOUDINARY_API_KEY") {
            self.api_key = Some(v);
        }
        if let Some(v) = text("CLOUDINARY_API_SECRET") {
            self.api_secret = Some(v);
        }
        if let Some(v) = text("CLOUDINARY_UPLOAD_PRESET") {
            self.upload_preset = Some(v);
        }
        if let Some(v) = text("GALLERY_FOLDER") {
            self.folder = v;
        }

        self.port = parse_or_keep("GALLERY_PORT", text("GALLERY_PORT"), self.port);
        self.cache_seconds =
            parse_or_keep("GALLERY_CACHE_SECONDS", text("GALLERY_CACHE_SECONDS"), self.cache_seconds);
        self
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let required = |value: &Option<String>, name: &'static str, flag: &'static str| {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .ok_or(GalleryError::MissingCredential(name, flag))
        };

        Ok(Credentials {
            cloud_name: required(&self.cloud_name, "cloud_name", "cloud-name")?,
            api_key: required(&self.api_key, "api_key", "api-key")?,
            api_secret: required(&self.api_secret, "api_secret", "api-secret")?,
        })
    }

    pub fn public_config(&self) -> PublicConfig {
        PublicConfig {
            cloud_name: self.cloud_name.clone(),
            upload_preset: self.upload_preset.clone(),
            page_size: self.page_size,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn parse_or_keep<T>(key: &str, raw: Option<String>, current: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return current;
    };

    match raw.parse() {
        Ok(value) => {
            info!("{key} = {raw}");
            value
        }
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, keeping {current}");
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.folder, "gallery");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_ttl(), Duration::ZERO);
    }

    #[test]
    fn test_apply_env_overrides() {
        let config = Config::default().apply_env(env(&[
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
            ("CLOUDINARY_UPLOAD_PRESET", "unsigned"),
            ("GALLERY_FOLDER", "photos"),
            ("GALLERY_PORT", "8080"),
            ("GALLERY_CACHE_SECONDS", "30"),
        ]));

        assert_eq!(config.cloud_name.as_deref(), Some("demo"));
        assert_eq!(config.upload_preset.as_deref(), Some("unsigned"));
        assert_eq!(config.folder, "photos");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_seconds, 30);

        let credentials = config.credentials().expect("認証情報が揃っているはず");
        assert_eq!(credentials.api_key, "key");
        assert_eq!(credentials.api_secret, "secret");
    }

    #[test]
    fn test_apply_env_ignores_invalid_port() {
        let config = Config::default().apply_env(env(&[("GALLERY_PORT", "not-a-port")]));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_apply_env_ignores_blank_values() {
        let config = Config {
            cloud_name: Some("from-file".into()),
            ..Default::default()
        }
        .apply_env(env(&[("CLOUDINARY_CLOUD_NAME", "  ")]));
        assert_eq!(config.cloud_name.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_missing_credentials() {
        let config = Config {
            cloud_name: Some("demo".into()),
            api_key: Some("key".into()),
            ..Default::default()
        };

        let err = config.credentials().unwrap_err();
        assert!(matches!(err, GalleryError::MissingCredential("api_secret", _)));
        assert!(err.to_string().contains("--set-api-secret"));
    }

    #[test]
    fn test_public_config_has_no_secrets() {
        let config = Config {
            cloud_name: Some("demo".into()),
            api_secret: Some("secret".into()),
            upload_preset: Some("unsigned".into()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config.public_config()).unwrap();
        assert!(json.contains("demo"));
        assert!(json.contains("unsigned"));
        assert!(!json.contains("\"secret\""));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            cloud_name: Some("demo".into()),
            cache_seconds: 10,
            ..Default::default()
        };
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).expect("設定読み込み失敗");
        assert_eq!(loaded.cloud_name.as_deref(), Some("demo"));
        assert_eq!(loaded.cache_seconds, 10);
        assert_eq!(loaded.folder, "gallery");
    }

    #[test]
    fn test_load_missing_file_uses_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded.port, 3000);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"folder": "pets"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.folder, "pets");
        assert_eq!(loaded.page_size, 12);
    }

    #[test]
    fn test_load_or_default_with_broken_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_from(&path).is_err());
        let loaded = Config::load_or_default_from(&path);
        assert_eq!(loaded.page_size, 12);
        assert_eq!(loaded.folder, "gallery");
    }

    #[test]
    fn test_load_or_default_reads_valid_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"page_size": 24}"#).unwrap();

        assert_eq!(Config::load_or_default_from(&path).page_size, 24);
    }
}
