//! Locating the data availability / data sources section.

use once_cell::sync::Lazy;
use regex::Regex;

/// A located availability/sources block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The matched header line, trimmed.
    pub heading: String,
    /// Span from the start of the header line to the next blank line
    /// (exclusive) or the end of the document, header included.
    pub text: String,
}

// Header vocabulary, matched at the start of a line with optional section
// numbering ("3.", "3.1", "4)") in front. Longer phrases come first so
// "data availability statement" is not cut short at "data availability".
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(?:\d+(?:\.\d+)*[.)]?[ \t]+)?(?:data[ \t]+availability[ \t]+statement|data[ \t]+and[ \t]+code[ \t]+availability|data[ \t]+availability|availability[ \t]+of[ \t]+data|data[ \t]+sources?|source[ \t]+of[ \t]+data|data[ \t]+access|data[ \t]+description)\b[^\n]*",
    )
    .unwrap()
});

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Find the first availability/sources header and return its section.
///
/// Returns `None` when no header from the vocabulary matches; callers then
/// fall back to the whole document as extraction scope.
pub fn find_availability_section(text: &str) -> Option<Section> {
    let header = HEADER_RE.find(text)?;
    let heading = header.as_str().trim().to_string();
    let end = match BLANK_LINE_RE.find(&text[header.end()..]) {
        Some(blank) => header.end() + blank.start(),
        None => text.len(),
    };
    Some(Section {
        heading,
        text: text[header.start()..end].to_string(),
    })
}
