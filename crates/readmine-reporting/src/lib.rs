//! Export and aggregate reporting for extraction records.
//!
//! The flatten-at-export rule lives here: in-memory records keep their
//! lists, and only [`export::FlatRecord`] joins them with `"; "` on the way
//! to CSV or JSONL. Nothing ever parses a joined field back apart.

use thiserror::Error;

#[cfg(feature = "charts")]
pub mod charts;
pub mod export;

#[cfg(feature = "charts")]
pub use charts::render_charts;
pub use export::{FlatRecord, LIST_SEPARATOR, export_csv, export_jsonl, write_csv, write_jsonl};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(not(feature = "charts"))]
    #[error("chart output not compiled in; rebuild with the `charts` feature")]
    NoChartSupport,
}

/// Stub that reports the missing capability when charts are compiled out.
#[cfg(not(feature = "charts"))]
pub fn render_charts(
    _records: &[readmine_core::ExtractionRecord],
    _out_dir: &std::path::Path,
) -> Result<Vec<std::path::PathBuf>, ReportError> {
    Err(ReportError::NoChartSupport)
}

/// Lowercased authority part of a URL ("data.worldbank.org"), or `None`
/// when there is no scheme separator. Used for aggregate domain counts
/// only; per-record URLs stay verbatim.
pub fn domain_of(url: &str) -> Option<String> {
    let rest = url.split_once("://")?.1;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    if authority.is_empty() {
        return None;
    }
    Some(authority.to_ascii_lowercase())
}
