//! Scoped temp-file spooling for uploaded PDFs.
//!
//! The upload is the only externally-visible mutable resource in the pipeline,
//! so its lifecycle is owned by an RAII guard: the file is created here and
//! removed when the guard drops, on success and error paths alike. Names are
//! randomized per file, so concurrent requests cannot collide.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

/// An uploaded PDF spooled to disk for the duration of one request.
pub struct SpooledPdf {
    file: NamedTempFile,
}

impl SpooledPdf {
    /// Write `data` to a fresh temp file under `dir` (or the system temp
    /// directory when `None`).
    pub fn write(dir: Option<&Path>, data: &[u8]) -> std::io::Result<Self> {
        let mut builder = Builder::new();
        builder.prefix("pdfbrief-").suffix(".pdf");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(data)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), bytes = data.len(), "Upload spooled");

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spool_writes_content() {
        let spool = SpooledPdf::write(None, b"%PDF-1.4 test").unwrap();
        let content = std::fs::read(spool.path()).unwrap();
        assert_eq!(content, b"%PDF-1.4 test");
    }

    #[test]
    fn test_spool_removed_on_drop() {
        let spool = SpooledPdf::write(None, b"%PDF-1.4").unwrap();
        let path = spool.path().to_path_buf();
        assert!(path.exists());
        drop(spool);
        assert!(!path.exists());
    }

    #[test]
    fn test_spool_in_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        let spool = SpooledPdf::write(Some(dir.path()), b"%PDF-1.4").unwrap();
        assert!(spool.path().starts_with(dir.path()));
    }

    #[test]
    fn test_concurrent_spools_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = SpooledPdf::write(Some(dir.path()), b"%PDF-1.4 a").unwrap();
        let b = SpooledPdf::write(Some(dir.path()), b"%PDF-1.4 b").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
