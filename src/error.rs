use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("メディアサービスの認証情報が設定されていません: {0}。`photo-gallery config --set-{1} ...` または環境変数で設定してください")]
    MissingCredential(&'static str, &'static str),

    #[error("{0}")]
    Validation(String),

    #[error("メディアサービスエラー ({status}): {message}")]
    MediaService { status: u16, message: String },

    #[error("ギャラリーAPIエラー ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_gallery_common::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
