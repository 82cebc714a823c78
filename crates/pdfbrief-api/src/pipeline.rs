//! The upload pipeline: validate, spool, extract, summarize, deliver.
//!
//! The spooled file is owned by an RAII guard, so the upload is removed from
//! disk when this function returns, on every path.

use pdfbrief_core::{AppError, UploadRequest};
use pdfbrief_processing::{extract, sanitize_filename, SpooledPdf};

use crate::state::AppState;

/// Raw multipart fields as received, before validation.
pub struct UploadForm {
    pub name: String,
    pub email: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Run the full pipeline for one upload. Returns the confirmation message
/// shown to the submitter.
pub async fn run(state: &AppState, form: UploadForm) -> Result<String, AppError> {
    let (name, email) =
        state
            .validator
            .validate_request(&form.name, &form.email, &form.content_type, &form.data)?;

    let request = UploadRequest {
        name,
        email,
        filename: sanitize_filename(&form.filename),
        content_type: form.content_type,
        size_bytes: form.data.len(),
    };

    tracing::info!(
        filename = %request.filename,
        size_bytes = request.size_bytes,
        "Upload accepted"
    );

    let spool = SpooledPdf::write(state.config.spool_dir.as_deref(), &form.data)?;

    let text = extract::extract_text_blocking(spool.path().to_path_buf()).await?;
    tracing::debug!(chars = text.len(), "Text extracted");

    // Never fails: degrades to an excerpt when every model is down.
    let summary = state.summarizer.summarize(&text).await;

    state
        .mailer
        .send_summary(&request.email, &request.name, &request.filename, summary.html())
        .await?;

    Ok(format!(
        "Summary of {} sent to {}",
        request.filename, request.email
    ))
}
