//! URL mentions.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Extract URLs in document order.
///
/// A URL runs from its scheme to the next whitespace; trailing sentence
/// punctuation and closing brackets are stripped. No normalization beyond
/// that, so `http://X` and `http://x` stay distinct. Duplicates survive
/// here and are removed (exact match) in the pipeline.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| clean_url(m.as_str()))
        .collect()
}

fn clean_url(raw: &str) -> Option<String> {
    let url = raw.trim_end_matches(|c: char| {
        matches!(c, '.' | ',' | ';' | ':' | ')' | ']' | '>' | '"' | '\'')
    });
    if url.ends_with("://") {
        return None;
    }
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_runs_to_whitespace() {
        let found = extract_urls("Data at https://data.worldbank.org/indicator for 2019.");
        assert_eq!(found, vec!["https://data.worldbank.org/indicator"]);
    }

    #[test]
    fn trailing_punctuation_is_stripped() {
        let found = extract_urls("(see https://example.org/files).");
        assert_eq!(found, vec!["https://example.org/files"]);
    }

    #[test]
    fn angle_bracket_wrapping_is_stripped() {
        let found = extract_urls("archived at <https://osf.io/abc123>.");
        assert_eq!(found, vec!["https://osf.io/abc123"]);
    }

    #[test]
    fn plain_http_is_accepted() {
        let found = extract_urls("mirror: http://mirror.example.net/data");
        assert_eq!(found, vec!["http://mirror.example.net/data"]);
    }

    #[test]
    fn urls_keep_document_order() {
        let found = extract_urls("first https://a.org then https://b.org end");
        assert_eq!(found, vec!["https://a.org", "https://b.org"]);
    }

    #[test]
    fn case_is_preserved() {
        let found = extract_urls("https://Example.org/Data and https://example.org/data");
        assert_eq!(
            found,
            vec!["https://Example.org/Data", "https://example.org/data"]
        );
    }

    #[test]
    fn bare_scheme_is_not_a_url() {
        assert!(extract_urls("broken link: https:// (fix me)").is_empty());
    }

    #[test]
    fn no_scheme_no_match() {
        assert!(extract_urls("visit www.example.org today").is_empty());
    }
}
