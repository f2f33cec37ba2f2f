use std::path::Path;

use thiserror::Error;

/// Errors from PDF-to-text conversion.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extract(String),
    #[error("no usable text: {0}")]
    NoText(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A PDF-to-text conversion backend.
///
/// Implementations live in their own crates so the extraction pipeline can
/// be tested without a PDF library. Conversion runs on blocking threads, so
/// implementations must be `Send + Sync` but need not be async.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text of the PDF at `path`.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
