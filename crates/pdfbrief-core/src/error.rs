//! Error types module
//!
//! This module provides the core error types used throughout the application.
//! All errors are unified under the `AppError` enum which covers request
//! validation, document processing, and delivery failures.
//!
//! Summarizer failures are deliberately absent: the summarizer degrades to a
//! fallback excerpt instead of failing the request, so it has no variant here.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for document-level issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_FILE_TYPE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Document has no extractable text")]
    EmptyDocument,

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Email delivery failed: {0}")]
    EmailDeliveryFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidFileType(_) => (400, "INVALID_FILE_TYPE", LogLevel::Debug),
        AppError::FileTooLarge(_) => (400, "FILE_TOO_LARGE", LogLevel::Debug),
        AppError::InvalidName(_) => (400, "INVALID_NAME", LogLevel::Debug),
        AppError::InvalidEmail(_) => (400, "INVALID_EMAIL", LogLevel::Debug),
        AppError::BadRequest(_) => (400, "BAD_REQUEST", LogLevel::Debug),
        AppError::EmptyDocument => (400, "EMPTY_DOCUMENT", LogLevel::Warn),
        AppError::ExtractionFailed(_) => (400, "EXTRACTION_FAILED", LogLevel::Warn),
        AppError::EmailDeliveryFailed(_) => (500, "EMAIL_DELIVERY_FAILED", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidFileType(_) => "InvalidFileType",
            AppError::FileTooLarge(_) => "FileTooLarge",
            AppError::InvalidName(_) => "InvalidName",
            AppError::InvalidEmail(_) => "InvalidEmail",
            AppError::BadRequest(_) => "BadRequest",
            AppError::EmptyDocument => "EmptyDocument",
            AppError::ExtractionFailed(_) => "ExtractionFailed",
            AppError::EmailDeliveryFailed(_) => "EmailDeliveryFailed",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including the source chain.
    /// Used as the `details` field of 500 responses; SMTP misconfiguration is
    /// the most common operational failure, so the transport detail must stay
    /// diagnosable by operators.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidFileType(ref msg) => msg.clone(),
            AppError::FileTooLarge(ref msg) => msg.clone(),
            AppError::InvalidName(ref msg) => msg.clone(),
            AppError::InvalidEmail(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::EmptyDocument => "The PDF contains no extractable text".to_string(),
            AppError::ExtractionFailed(_) => "Failed to extract text from the PDF".to_string(),
            AppError::EmailDeliveryFailed(_) => "Failed to send the summary email".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
