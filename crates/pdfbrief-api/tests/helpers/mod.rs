//! Shared test fixtures: fake summarizer backend, recording mailer, and a
//! minimal PDF builder.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use pdfbrief_api::services::email::Mailer;
use pdfbrief_api::setup::routes::setup_routes;
use pdfbrief_api::state::AppState;
use pdfbrief_core::{AppError, Config};
use pdfbrief_services::{GenerativeBackend, SummarizeError, SummaryService};

/// Scripted generative backend: returns the next result per call.
pub struct FakeBackend {
    results: Mutex<Vec<Result<String, SummarizeError>>>,
}

impl FakeBackend {
    pub fn new(mut results: Vec<Result<String, SummarizeError>>) -> Self {
        results.reverse();
        Self {
            results: Mutex::new(results),
        }
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, SummarizeError> {
        self.results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(SummarizeError::Transport("no scripted result".into())))
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub name: String,
    pub filename: String,
    pub summary_html: String,
}

/// Mailer that records every send instead of talking to a relay.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_summary(
        &self,
        to: &str,
        name: &str,
        filename: &str,
        summary_html: &str,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            name: name.to_string(),
            filename: filename.to_string(),
            summary_html: summary_html.to_string(),
        });
        Ok(())
    }
}

/// Mailer whose relay is always down.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_summary(&self, _: &str, _: &str, _: &str, _: &str) -> Result<(), AppError> {
        Err(AppError::EmailDeliveryFailed(
            "connection refused by relay".to_string(),
        ))
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "development".to_string(),
        max_upload_size_bytes: 10 * 1024 * 1024,
        spool_dir: None,
        gemini_api_key: "test-key".to_string(),
        summary_models: vec!["model-1".to_string(), "model-2".to_string()],
        smtp_host: "smtp.example.com".to_string(),
        smtp_port: 587,
        smtp_user: None,
        smtp_password: None,
        smtp_from: "noreply@example.com".to_string(),
        smtp_tls: true,
    }
}

/// Build a test server around a scripted backend and the given mailer.
pub fn build_server(
    config: Config,
    results: Vec<Result<String, SummarizeError>>,
    mailer: Arc<dyn Mailer>,
) -> TestServer {
    let backend = FakeBackend::new(results);
    let summarizer = Arc::new(SummaryService::new(backend, config.summary_models.clone()));
    let state = Arc::new(AppState::new(config.clone(), summarizer, mailer));
    let router = setup_routes(&config, state).expect("router setup");
    TestServer::new(router).expect("test server")
}

/// Build a minimal single-page PDF around the given content stream,
/// with a correct cross-reference table.
pub fn build_pdf(content_stream: &str) -> Vec<u8> {
    let objects = [
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n"
            .to_string(),
        format!(
            "4 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_stream.len(),
            content_stream
        ),
        "5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for obj in &objects {
        offsets.push(pdf.len());
        pdf.push_str(obj);
    }

    let xref_offset = pdf.len();
    pdf.push_str("xref\n0 6\n0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        xref_offset
    ));

    pdf.into_bytes()
}

pub fn sample_pdf() -> Vec<u8> {
    build_pdf("BT /F1 24 Tf 72 720 Td (Quarterly results improved significantly) Tj ET")
}
