//! HTTP error mapping for API handlers.

use crate::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shared by every "cannot read this paste" response.
pub const PASTE_NOT_FOUND_MESSAGE: &str = "Paste not found";

/// Wrapper that turns [`AppError`] into an HTTP response.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = if err.is_not_found_class() {
            // Missing, expired, and exhausted must be indistinguishable.
            (StatusCode::NOT_FOUND, PASTE_NOT_FOUND_MESSAGE.to_string())
        } else {
            match err {
                AppError::InvalidContent(msg) | AppError::BadRequest(msg) => {
                    (StatusCode::BAD_REQUEST, msg)
                }
                other => {
                    tracing::error!("Internal error: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        HttpError(err).into_response().status()
    }

    #[test]
    fn lifecycle_errors_map_to_not_found() {
        assert_eq!(status_of(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::Expired), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::ViewLimitExceeded), StatusCode::NOT_FOUND);
    }

    #[test]
    fn input_errors_map_to_bad_request() {
        assert_eq!(
            status_of(AppError::InvalidContent("empty".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::BadRequest("too large".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_errors_map_to_internal() {
        assert_eq!(
            status_of(AppError::StorageMessage("disk".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(AppError::Internal), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
