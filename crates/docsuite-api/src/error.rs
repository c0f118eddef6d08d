//! Transport-layer error rendering.
//!
//! Services speak [`AppError`]; this module decides the status code,
//! the machine-readable code string, and how much of the message is
//! safe to put on the wire.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use docsuite_core::error::{AppError, ErrorKind};

/// JSON body every failed request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
    /// Structured extras, e.g. per-field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Handler-side wrapper so `?` works on service results while still
/// producing a proper HTTP response.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            details: None,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::from(AppError::validation("request validation failed"))
            .with_details(serde_json::json!(errors))
    }
}

fn render(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Cache
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = render(self.inner.kind);

        // Internal failures keep their real message in the logs only.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.inner, "request failed internally");
            "internal server error".to_string()
        } else {
            self.inner.message.clone()
        };

        let body = Json(ApiErrorResponse {
            error: code.to_string(),
            message,
            details: self.details,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_statuses() {
        let cases = [
            (AppError::authentication("no"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("no"), StatusCode::FORBIDDEN),
            (AppError::not_found("no"), StatusCode::NOT_FOUND),
            (AppError::validation("no"), StatusCode::BAD_REQUEST),
            (AppError::conflict("no"), StatusCode::CONFLICT),
            (AppError::internal("no"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::database("no"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn internal_errors_do_not_leak_messages() {
        let rendered =
            ApiError::from(AppError::database("connection string leaked")).into_response();
        assert_eq!(rendered.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
