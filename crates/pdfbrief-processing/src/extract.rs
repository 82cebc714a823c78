//! PDF text extraction.

use std::path::{Path, PathBuf};

use pdfbrief_core::AppError;

/// Extraction errors. An unreadable document and a readable-but-textless
/// document are distinct failures: the latter is a client error the caller
/// reports as an empty document, not a mechanical extraction failure.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to extract text: {0}")]
    Failed(String),

    #[error("Document has no extractable text")]
    EmptyDocument,
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Failed(msg) => AppError::ExtractionFailed(msg),
            ExtractError::EmptyDocument => AppError::EmptyDocument,
        }
    }
}

/// Extract plain text from the PDF at `path`.
/// Whitespace-only output is reported as [`ExtractError::EmptyDocument`].
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let text =
        pdf_extract::extract_text(path).map_err(|e| ExtractError::Failed(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    Ok(text)
}

/// Async wrapper for [`extract_text`]. PDF parsing is CPU-bound, so it runs on
/// the blocking pool instead of stalling the async executor.
pub async fn extract_text_blocking(path: PathBuf) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(&path))
        .await
        .map_err(|e| ExtractError::Failed(format!("extraction task failed: {}", e)))?
}
