//! Pdfbrief Services Library
//!
//! Clients for external services: the generative-AI summarizer with its
//! ordered model-fallback chain.

pub mod summarizer;

pub use summarizer::{
    GeminiClient, GenerativeBackend, Summarize, SummarizeError, SummaryService,
};
