//! Pdfbrief Processing Library
//!
//! Upload validation, scoped temp-file spooling, and PDF text extraction.

pub mod extract;
pub mod spool;
pub mod validator;

pub use extract::ExtractError;
pub use spool::SpooledPdf;
pub use validator::{sanitize_filename, UploadValidator, ValidationError};
