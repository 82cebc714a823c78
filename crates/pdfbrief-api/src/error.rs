//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `.map_err(Into::into)`
//! so they become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use pdfbrief_core::{AppError, ErrorMetadata, LogLevel};
use pdfbrief_processing::{ExtractError, ValidationError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Diagnostic detail, present on server errors only. A failed SMTP
    /// handshake must stay diagnosable from the response an operator sees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from pdfbrief-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ExtractError> for HttpAppError {
    fn from(err: ExtractError) -> Self {
        HttpAppError(err.into())
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Client errors carry the client message only; server errors also
        // carry the source chain so delivery failures can be diagnosed.
        let details = if status.is_server_error() {
            Some(app_error.detailed_message())
        } else {
            None
        };

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_validation_error_file_too_large() {
        let validation_err = ValidationError::FileTooLarge {
            size: 1000,
            max: 500,
        };
        let HttpAppError(app_err) = validation_err.into();
        match app_err {
            AppError::FileTooLarge(msg) => {
                assert!(msg.contains("1000"));
                assert!(msg.contains("500"));
            }
            _ => panic!("Expected FileTooLarge variant"),
        }
    }

    #[test]
    fn test_from_extract_error_empty_document() {
        let HttpAppError(app_err) = ExtractError::EmptyDocument.into();
        assert!(matches!(app_err, AppError::EmptyDocument));
    }

    /// Verifies the public error response contract: serialized ErrorResponse
    /// has "error" and "code", and "details" only when set.
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Failed to send the summary email".to_string(),
            code: "EMAIL_DELIVERY_FAILED".to_string(),
            details: Some("connection refused".to_string()),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert_eq!(
            json.get("code").and_then(|v| v.as_str()),
            Some("EMAIL_DELIVERY_FAILED")
        );
        assert!(json.get("details").is_some());

        let response = ErrorResponse {
            error: "Invalid email".to_string(),
            code: "INVALID_EMAIL".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("details").is_none());
    }
}
