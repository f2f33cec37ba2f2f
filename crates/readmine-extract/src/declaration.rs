//! Authorship / data-use certification sentences.

use once_cell::sync::Lazy;
use regex::Regex;

/// Cap on the stored declaration, in characters.
const MAX_STORED_CHARS: usize = 400;

// Subject tokens are case-sensitive ("I certify", "We certify", "I/We
// certify"); the verb and the anchor nouns are not. The sentence may span
// line breaks and ends at the first period within 300 characters of the
// anchor.
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\b(?:I\s*/\s*We|I|We)\s+(?i:certify)\b.*?\b(?i:authors?|work|data|analysis)\b.{0,300}?\.",
    )
    .unwrap()
});

/// Find the first certification sentence in the document.
///
/// The whole document is searched, not just the availability section, since
/// these sentences usually sit on a title or signature page. The stored
/// text is capped at 400 characters.
pub fn find_declaration(text: &str) -> Option<String> {
    let matched = DECLARATION_RE.find(text)?;
    Some(truncate_chars(matched.as_str(), MAX_STORED_CHARS))
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
