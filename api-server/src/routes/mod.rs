//! Route handlers

pub mod health;
pub mod payment;
pub mod properties;
pub mod room_types;
pub mod rooms;

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

/// Map a core error to a response.
///
/// Validation and lookup failures are shown as-is. Store failures are logged
/// and replaced with a generic message naming the action that failed.
pub(crate) fn map_store_error(err: dorm_core::Error, action: &str) -> ApiError {
    match err {
        dorm_core::Error::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
        dorm_core::Error::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        other => {
            tracing::error!(error = %other, "Failed to {}", action);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {}", action),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_generic() {
        let (status, Json(body)) = map_store_error(
            dorm_core::Error::Storage("disk on fire".to_string()),
            "save room",
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to save room");
    }

    #[test]
    fn test_validation_and_not_found_pass_through() {
        let (status, Json(body)) =
            map_store_error(dorm_core::Error::Validation("bad".to_string()), "x");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "bad");

        let (status, _) = map_store_error(dorm_core::Error::NotFound("gone".to_string()), "x");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
