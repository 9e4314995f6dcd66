//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use photo_gallery::config::Config;
use photo_gallery::error::GalleryError;
use photo_gallery_common::ListQuery;
use tempfile::tempdir;

/// GalleryErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        GalleryError::Config("テスト設定エラー".to_string()),
        GalleryError::MissingCredential("cloud_name", "cloud-name"),
        GalleryError::Validation("page must be 1 or greater".to_string()),
        GalleryError::MediaService {
            status: 401,
            message: "Invalid api_key".to_string(),
        },
        GalleryError::Api {
            status: 500,
            message: "Failed to fetch images".to_string(),
        },
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 認証情報不足のメッセージに設定方法が含まれる
#[test]
fn test_missing_credential_message() {
    let err = GalleryError::MissingCredential("api_key", "api-key");
    let display = format!("{}", err);

    assert!(display.contains("api_key"));
    assert!(display.contains("photo-gallery config --set-api-key"));
}

#[test]
fn test_media_service_message_includes_status() {
    let err = GalleryError::MediaService {
        status: 420,
        message: "Rate Limited".to_string(),
    };
    let display = format!("{}", err);

    assert!(display.contains("420"));
    assert!(display.contains("Rate Limited"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: GalleryError = io_err.into();

    assert!(matches!(err, GalleryError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: GalleryError = json_err.into();

    assert!(matches!(err, GalleryError::JsonParse(_)));
}

/// クエリ検証エラーは透過的にそのまま表示される
#[test]
fn test_common_validation_is_transparent() {
    let common_err = ListQuery::parse(Some("0"), None, None).unwrap_err();
    let err: GalleryError = common_err.into();

    assert!(matches!(err, GalleryError::Common(_)));
    assert_eq!(
        format!("{}", err),
        "max_results must be an integer between 1 and 500"
    );
}

/// 壊れた設定ファイルはJSONエラーになる
#[test]
fn test_load_broken_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(GalleryError::JsonParse(_))));
}

/// 認証情報が未設定ならサーバー用クライアントを作れない
#[test]
fn test_credentials_required() {
    let err = Config::default().credentials().unwrap_err();
    assert!(matches!(err, GalleryError::MissingCredential("cloud_name", _)));
}
