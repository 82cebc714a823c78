//! Document summarization with ordered model fallback.
//!
//! The summarizer is the only stage that talks to an unreliable, rate-limited
//! third-party dependency with multiple interchangeable backends. It never
//! fails outward: when every configured model is exhausted it degrades to a
//! truncated plain-text excerpt wrapped in a warning block, and the request
//! still succeeds.

mod gemini;

use async_trait::async_trait;

use pdfbrief_core::SummaryResult;

pub use gemini::GeminiClient;

/// Upstream request-size limit: only this many characters of the document
/// text are sent to the model.
pub const MAX_PROMPT_CHARS: usize = 30_000;

/// Length of the plain-text excerpt used when every model fails.
pub const FALLBACK_EXCERPT_CHARS: usize = 3_000;

const INSTRUCTION: &str = "Summarize the following document. Respond with HTML only, \
no markdown. Do not include a table of contents or any preamble such as \
\"here is the summary\". Bold the key terms with <strong> tags. End with a \
short bullet list of key takeaways.";

/// Summarization errors, classified by category rather than message text.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SummarizeError {
    /// Recoverable errors trigger the next model in the fallback chain;
    /// anything else aborts the chain immediately.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SummarizeError::QuotaExhausted(_) | SummarizeError::ModelNotFound(_)
        )
    }
}

/// One generation request against a named model.
/// Implemented by [`GeminiClient`] (cloud) and by test fakes.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, SummarizeError>;
}

/// Object-safe summarization seam for the pipeline.
#[async_trait]
pub trait Summarize: Send + Sync {
    /// Produce an HTML summary of `text`. Never fails: degraded output is
    /// reported through the [`SummaryResult`] variant, not an error.
    async fn summarize(&self, text: &str) -> SummaryResult;
}

/// Summarization service: iterates an ordered model list (preference order,
/// fastest/cheapest first) over a single backend.
pub struct SummaryService<B> {
    backend: B,
    models: Vec<String>,
}

impl<B: GenerativeBackend> SummaryService<B> {
    pub fn new(backend: B, models: Vec<String>) -> Self {
        Self { backend, models }
    }
}

#[async_trait]
impl<B: GenerativeBackend> Summarize for SummaryService<B> {
    async fn summarize(&self, text: &str) -> SummaryResult {
        let prompt = build_prompt(text);
        let mut last_error: Option<SummarizeError> = None;

        for model in &self.models {
            match self.backend.generate(model, &prompt).await {
                Ok(raw) => {
                    tracing::info!(model = %model, "Summary generated");
                    return SummaryResult::Generated {
                        model: model.clone(),
                        html: strip_code_fences(&raw),
                    };
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(model = %model, error = %e, "Model unavailable, trying next");
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::error!(model = %model, error = %e, "Summarization aborted");
                    last_error = Some(e);
                    break;
                }
            }
        }

        // Externally-silent degradation: log the terminal reason, return an excerpt.
        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no models configured".to_string());
        tracing::warn!(
            degraded = true,
            reason = %reason,
            "All summarization attempts failed, returning fallback excerpt"
        );

        SummaryResult::Excerpt {
            html: fallback_excerpt(text),
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!("{}\n\n{}", INSTRUCTION, truncate_chars(text, MAX_PROMPT_CHARS))
}

/// Truncate to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strip markdown code-fence markers that models sometimes wrap HTML output in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```html", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Build the degraded result: an escaped excerpt of the document text inside
/// a visually distinct warning block.
pub fn fallback_excerpt(text: &str) -> String {
    let excerpt = escape_html(truncate_chars(text, FALLBACK_EXCERPT_CHARS)).replace('\n', "<br>");
    format!(
        "<div style=\"border:1px solid #f0ad4e;background:#fcf8e3;padding:12px;border-radius:4px;\">\
         <p><strong>Automatic summarization was unavailable.</strong> \
         Below is an excerpt of the document text.</p>\
         <p>{}</p></div>",
        excerpt
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
