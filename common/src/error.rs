//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// リクエストパラメータの検証エラー（HTTPでは400として返す）
    #[error("{0}")]
    Validation(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let error = Error::Validation("max_results must be a positive integer".to_string());
        assert_eq!(format!("{}", error), "max_results must be a positive integer");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Validation("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Validation"));
        assert!(debug.contains("テスト"));
    }
}
