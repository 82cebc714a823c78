//! Service initialization.

use std::sync::Arc;

use anyhow::Result;

use pdfbrief_core::Config;
use pdfbrief_services::{GeminiClient, SummaryService};

use crate::services::email::SmtpMailer;
use crate::state::AppState;

/// Wire up the production summarizer and mailer behind the state's trait objects.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let backend = GeminiClient::new(config.gemini_api_key.clone());
    let summarizer = Arc::new(SummaryService::new(backend, config.summary_models.clone()));

    let mailer = Arc::new(SmtpMailer::from_config(config)?);

    tracing::info!(
        models = %config.summary_models.join(","),
        "Services initialized"
    );

    Ok(Arc::new(AppState::new(config.clone(), summarizer, mailer)))
}
