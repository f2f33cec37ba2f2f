//! PDF-to-text conversion backends and the fallback chain.
//!
//! Two real backends wrap the `pdf-extract` and `lopdf` crates;
//! [`ConversionChain`] tries them in order and applies the minimum-text
//! acceptance rule, so a backend that "succeeds" with a near-empty page
//! dump still falls through to the next one.

use std::path::Path;

use readmine_core::{BackendError, PdfBackend};

/// Accept a backend's output only above this many trimmed characters,
/// unless it is the last backend in the chain.
pub const DEFAULT_MIN_TEXT_LEN: usize = 60;

/// Primary backend: the `pdf-extract` crate. Better layout handling and
/// ligature folding than the fallback.
#[derive(Debug, Default)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        pdf_extract::extract_text(path).map_err(|e| BackendError::Extract(e.to_string()))
    }
}

/// Fallback backend: page-wise extraction via `lopdf`. Cruder output, but
/// it opens some files `pdf-extract` rejects.
#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let doc = lopdf::Document::load(path).map_err(|e| BackendError::Open(e.to_string()))?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        doc.extract_text(&pages)
            .map_err(|e| BackendError::Extract(e.to_string()))
    }
}

/// Ordered fallback chain over [`PdfBackend`]s.
///
/// Every backend except the last must produce at least the minimum number
/// of trimmed characters to be accepted; the last one only has to produce
/// something non-empty. When all backends fail or produce nothing, the
/// last failure is reported as the conversion error.
pub struct ConversionChain {
    backends: Vec<Box<dyn PdfBackend>>,
    min_text_len: usize,
}

impl ConversionChain {
    /// The standard chain: `pdf-extract` first, `lopdf` as fallback.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(PdfExtractBackend::new()),
            Box::new(LopdfBackend::new()),
        ])
    }

    pub fn new(backends: Vec<Box<dyn PdfBackend>>) -> Self {
        Self {
            backends,
            min_text_len: DEFAULT_MIN_TEXT_LEN,
        }
    }

    /// Set the acceptance threshold applied to every backend but the last.
    pub fn with_min_text_len(mut self, min_text_len: usize) -> Self {
        self.min_text_len = min_text_len;
        self
    }
}

impl PdfBackend for ConversionChain {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let last = self.backends.len().saturating_sub(1);
        let mut last_err: Option<BackendError> = None;
        for (i, backend) in self.backends.iter().enumerate() {
            match backend.extract_text(path) {
                Ok(text) => {
                    let chars = text.trim().chars().count();
                    let enough = chars > 0 && (chars >= self.min_text_len || i == last);
                    if enough {
                        return Ok(text);
                    }
                    tracing::debug!(
                        backend = i,
                        chars,
                        path = %path.display(),
                        "text below acceptance threshold, trying next backend"
                    );
                    last_err = Some(BackendError::NoText(format!(
                        "only {chars} characters recovered"
                    )));
                }
                Err(err) => {
                    tracing::debug!(
                        backend = i,
                        error = %err,
                        path = %path.display(),
                        "backend failed, trying next"
                    );
                    last_err = Some(err);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| BackendError::NoText("no backends configured".to_string())))
    }
}
