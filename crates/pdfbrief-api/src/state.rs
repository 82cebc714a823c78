//! Shared application state.

use std::sync::Arc;

use pdfbrief_core::Config;
use pdfbrief_processing::UploadValidator;
use pdfbrief_services::Summarize;

use crate::services::email::Mailer;

/// State shared across all request handlers.
///
/// The summarizer and the mailer are held behind trait objects so tests can
/// substitute in-process fakes for the Gemini API and the SMTP relay.
pub struct AppState {
    pub config: Config,
    pub validator: UploadValidator,
    pub summarizer: Arc<dyn Summarize>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(
        config: Config,
        summarizer: Arc<dyn Summarize>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let validator = UploadValidator::new(config.max_upload_size_bytes);
        Self {
            config,
            validator,
            summarizer,
            mailer,
        }
    }
}
