//! Domain models for a single upload request.
//!
//! Nothing here outlives one request; the only entity with an explicit
//! lifecycle is the spooled temp file, owned by `pdfbrief-processing`.

/// Validated identity and file metadata for one upload. Transient; never persisted.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub name: String,
    pub email: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// HTML summary produced by the pipeline.
///
/// The variant records which path produced it: callers must be able to tell an
/// AI-generated summary apart from the degraded plain-text excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    /// Summary returned by a generative model, tagged with the model that produced it.
    Generated { model: String, html: String },
    /// Truncated excerpt of the document text, wrapped in a warning block.
    /// Returned when every configured model failed.
    Excerpt { html: String },
}

impl SummaryResult {
    pub fn html(&self) -> &str {
        match self {
            SummaryResult::Generated { html, .. } => html,
            SummaryResult::Excerpt { html } => html,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SummaryResult::Excerpt { .. })
    }

    /// Model identifier for generated summaries, `None` for the fallback excerpt.
    pub fn model(&self) -> Option<&str> {
        match self {
            SummaryResult::Generated { model, .. } => Some(model),
            SummaryResult::Excerpt { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_summary_accessors() {
        let result = SummaryResult::Generated {
            model: "gemini-2.0-flash".to_string(),
            html: "<p>summary</p>".to_string(),
        };
        assert_eq!(result.html(), "<p>summary</p>");
        assert_eq!(result.model(), Some("gemini-2.0-flash"));
        assert!(!result.is_fallback());
    }

    #[test]
    fn test_excerpt_is_fallback() {
        let result = SummaryResult::Excerpt {
            html: "<div>excerpt</div>".to_string(),
        };
        assert_eq!(result.html(), "<div>excerpt</div>");
        assert_eq!(result.model(), None);
        assert!(result.is_fallback());
    }
}
