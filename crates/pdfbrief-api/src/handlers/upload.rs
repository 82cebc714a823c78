//! Upload handler: multipart parsing and pipeline dispatch.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use pdfbrief_core::AppError;

use crate::error::HttpAppError;
use crate::pipeline::{self, UploadForm};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
}

pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_upload_form(multipart, state.config.max_upload_size_bytes).await?;
    let message = pipeline::run(&state, form).await?;

    Ok(Json(UploadResponse {
        success: true,
        message,
    }))
}

/// Classify a multipart read failure. A body cut off by the request-size
/// limit layer surfaces here as a 413-status multipart error, and must be
/// reported as an oversize upload rather than a malformed request.
fn multipart_read_error(err: MultipartError, context: &str, max_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge(format!("Upload exceeds max {} bytes", max_size))
    } else {
        AppError::BadRequest(format!("{}: {}", context, err))
    }
}

/// Pull the `name`, `email`, and `pdf` fields out of the multipart form.
/// Unknown fields are ignored; a second `pdf` field is rejected.
async fn extract_upload_form(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadForm, AppError> {
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_read_error(e, "Failed to read multipart", max_size))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "name" => {
                name = Some(field.text().await.map_err(|e| {
                    multipart_read_error(e, "Failed to read name field", max_size)
                })?);
            }
            "email" => {
                email = Some(field.text().await.map_err(|e| {
                    multipart_read_error(e, "Failed to read email field", max_size)
                })?);
            }
            "pdf" => {
                if file.is_some() {
                    return Err(AppError::BadRequest(
                        "Multiple file fields are not allowed; send exactly one field named 'pdf'"
                            .to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "document.pdf".to_string());
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_read_error(e, "Failed to read file data", max_size))?;
                file = Some((filename, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| AppError::BadRequest("Missing field 'name'".to_string()))?;
    let email = email.ok_or_else(|| AppError::BadRequest("Missing field 'email'".to_string()))?;
    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing field 'pdf'".to_string()))?;

    Ok(UploadForm {
        name,
        email,
        filename,
        content_type,
        data,
    })
}
