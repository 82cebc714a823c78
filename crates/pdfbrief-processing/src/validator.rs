//! Upload request validation.
//!
//! All checks run before any external call is made; a request that fails here
//! is rejected without touching the extractor, the summarizer, or the relay.

use pdfbrief_core::AppError;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const MIN_NAME_LENGTH: usize = 2;

/// Validation errors for upload requests
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid content type: {content_type} (expected {expected})")]
    InvalidContentType {
        content_type: String,
        expected: &'static str,
    },

    #[error("File does not look like a PDF document")]
    MissingPdfSignature,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("Name must be at least {MIN_NAME_LENGTH} characters")]
    InvalidName,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidContentType {
                content_type,
                expected,
            } => AppError::InvalidFileType(format!(
                "Invalid content type '{}', expected {}",
                content_type, expected
            )),
            ValidationError::MissingPdfSignature => {
                AppError::InvalidFileType("File is not a valid PDF document".to_string())
            }
            ValidationError::FileTooLarge { size, max } => AppError::FileTooLarge(format!(
                "{} bytes exceeds max {} bytes",
                size, max
            )),
            ValidationError::EmptyFile => {
                AppError::InvalidFileType("Uploaded file is empty".to_string())
            }
            ValidationError::InvalidName => {
                AppError::InvalidName("Name must be at least 2 characters".to_string())
            }
            ValidationError::InvalidEmail(email) => {
                AppError::InvalidEmail(format!("'{}' is not a valid email address", email))
            }
        }
    }
}

/// Upload request validator
///
/// Checks the declared MIME type, the PDF magic bytes, the configured size
/// limit, and the submitter identity fields.
pub struct UploadValidator {
    max_file_size: usize,
}

impl UploadValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate content type. Parameters are stripped before comparison
    /// (e.g. "application/pdf; charset=binary" is accepted).
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type
            .split(';')
            .next()
            .map(|s| s.trim())
            .unwrap_or(content_type)
            .to_lowercase();

        if normalized != PDF_CONTENT_TYPE {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                expected: PDF_CONTENT_TYPE,
            });
        }

        Ok(())
    }

    /// Validate file size against the configured maximum
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// The declared MIME type is not trusted on its own: the payload must
    /// start with the PDF signature.
    pub fn validate_pdf_signature(&self, data: &[u8]) -> Result<(), ValidationError> {
        if !data.starts_with(b"%PDF") {
            return Err(ValidationError::MissingPdfSignature);
        }
        Ok(())
    }

    /// Validate the submitter name. Returns the trimmed name.
    pub fn validate_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.chars().count() < MIN_NAME_LENGTH {
            return Err(ValidationError::InvalidName);
        }
        Ok(trimmed.to_string())
    }

    /// Validate the submitter email against a basic `local@domain.tld` shape.
    /// Returns the trimmed address.
    pub fn validate_email(email: &str) -> Result<String, ValidationError> {
        let trimmed = email.trim();
        if is_valid_email(trimmed) {
            Ok(trimmed.to_string())
        } else {
            Err(ValidationError::InvalidEmail(email.to_string()))
        }
    }

    /// Run all checks in rejection order: file type, size, signature, name, email.
    /// Returns the trimmed (name, email) pair.
    pub fn validate_request(
        &self,
        name: &str,
        email: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<(String, String), ValidationError> {
        self.validate_content_type(content_type)?;
        self.validate_file_size(data.len())?;
        self.validate_pdf_signature(data)?;
        let name = Self::validate_name(name)?;
        let email = Self::validate_email(email)?;
        Ok((name, email))
    }
}

/// Basic `local@domain.tld` shape check: one '@', non-empty local part,
/// dotted domain with a TLD of at least two characters, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }

    // TLD must be at least two characters
    labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// Sanitize a client-supplied filename for use in the email subject and logs.
/// Strips path components and replaces disallowed characters.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('_').is_empty() {
        return "document.pdf".to_string();
    }

    sanitized
}
