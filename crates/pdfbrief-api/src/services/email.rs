//! Email delivery of generated summaries via SMTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use pdfbrief_core::{AppError, Config};

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivery seam for the pipeline. Tests substitute a recording fake.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the summary email for one completed upload.
    async fn send_summary(
        &self,
        to: &str,
        name: &str,
        filename: &str,
        summary_html: &str,
    ) -> Result<(), AppError>;
}

/// SMTP-backed mailer.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let from: Mailbox = config
            .smtp_from
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid SMTP_FROM '{}': {}", config.smtp_from, e))?;

        let builder = if config.smtp_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(SMTP_TIMEOUT));

        if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.smtp_tls,
            "SMTP mailer initialized"
        );

        Ok(Self {
            transport: Arc::new(builder.build()),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_summary(
        &self,
        to: &str,
        name: &str,
        filename: &str,
        summary_html: &str,
    ) -> Result<(), AppError> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| AppError::EmailDeliveryFailed(format!("Invalid recipient: {}", e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to_addr)
            .subject(summary_subject(filename))
            .header(ContentType::TEXT_HTML)
            .body(render_email_html(name, filename, summary_html))
            .map_err(|e| AppError::EmailDeliveryFailed(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::EmailDeliveryFailed(e.to_string()))?;

        tracing::info!(to = %to, filename = %filename, "Summary email sent");
        Ok(())
    }
}

pub fn summary_subject(filename: &str) -> String {
    format!("Your PDF summary: {}", filename)
}

/// Assemble the email body. The summary is trusted HTML produced by the
/// summarizer; the identity fields are client input and get escaped.
pub fn render_email_html(name: &str, filename: &str, summary_html: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html><body style=\"font-family:sans-serif;max-width:640px;margin:0 auto;\">\
         <p>Hi {name},</p>\
         <p>Here is the summary of <strong>{filename}</strong>:</p>\
         {summary}\
         <p style=\"color:#888;font-size:12px;\">This email was generated automatically. \
         The uploaded document has already been deleted from our servers.</p>\
         </body></html>",
        name = escape_html(name),
        filename = escape_html(filename),
        summary = summary_html,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
