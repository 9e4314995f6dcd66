use crate::error::GalleryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use photo_gallery_common::ErrorBody;
use thiserror::Error;
use tracing::error;

pub const IMAGE_ID_REQUIRED: &str = "Image ID is required";
pub const LIST_FAILED: &str = "Failed to fetch images";
pub const DELETE_FAILED: &str = "Failed to delete image";

/// HTTP応答に変換されるエラー
///
/// メディアサービスの詳細はログにだけ残し、呼び出し側には汎用メッセージを返す。
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to fetch images: {0}")]
    ListFailed(#[source] GalleryError),

    #[error("Failed to delete image: {0}")]
    DeleteFailed(#[source] GalleryError),
}

impl From<photo_gallery_common::Error> for ApiError {
    fn from(e: photo_gallery_common::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::ListFailed(source) => {
                error!(error = %source, "Error fetching images");
                (StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED.to_string())
            }
            ApiError::DeleteFailed(source) => {
                error!(error = %source, "Error deleting image");
                (StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED.to_string())
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let response = ApiError::BadRequest(IMAGE_ID_REQUIRED.into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_errors_are_500() {
        let upstream = || GalleryError::MediaService {
            status: 401,
            message: "Invalid api_key".into(),
        };
        assert_eq!(
            ApiError::ListFailed(upstream()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::DeleteFailed(upstream()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let err = ApiError::ListFailed(GalleryError::MediaService {
            status: 500,
            message: "boom".into(),
        });
        let display = err.to_string();
        assert!(display.starts_with("Failed to fetch images"));
        assert!(display.contains("boom"));
    }

    #[test]
    fn test_from_validation_error() {
        let err: ApiError = photo_gallery_common::Error::Validation("bad".into()).into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "bad"));
    }
}
