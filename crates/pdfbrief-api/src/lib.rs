//! Pdfbrief API
//!
//! HTTP surface for the upload-to-inbox pipeline: accept a PDF upload,
//! validate it, extract its text, summarize it, and email the summary
//! to the submitter.

pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use state::AppState;
