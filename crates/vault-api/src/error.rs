//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use vault_core::error::{AppError, ErrorKind};

/// HTTP-layer wrapper around `AppError`.
///
/// Handlers return `Result<_, ApiError>`; the `From` impl lets `?` lift
/// domain errors across the boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Status, error code, and client-facing message for a domain error.
///
/// Upstream (502) failures keep their message so callers can see what the
/// asset host reported; 500 details stay in the logs only.
fn response_parts(err: &AppError) -> (StatusCode, &'static str, String) {
    let (status, error_code) = match &err.kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "An internal error occurred".to_string()
    } else {
        err.message.clone()
    };

    (status, error_code, message)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code, message) = response_parts(&err);

        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
        }

        let body = ApiErrorResponse {
            success: false,
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        response_parts(&err).0
    }

    fn message_of(err: AppError) -> String {
        response_parts(&err).2
    }

    #[test]
    fn kinds_map_to_expected_statuses() {
        assert_eq!(status_of(AppError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::authentication("x")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::authorization("x")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::conflict("x")), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::external_service("x")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::database("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::internal("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_reaches_the_client() {
        let err = AppError::external_service("Asset host error (400): Invalid image file");
        assert_eq!(
            message_of(err),
            "Asset host error (400): Invalid image file"
        );
    }

    #[test]
    fn internal_details_are_redacted() {
        assert_eq!(
            message_of(AppError::database("connection reset by peer")),
            "An internal error occurred"
        );
        assert_eq!(
            message_of(AppError::internal("stack detail")),
            "An internal error occurred"
        );
    }
}
