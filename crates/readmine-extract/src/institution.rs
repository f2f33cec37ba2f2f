//! Source-institution mentions against a fixed whitelist.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

// Multi-word names and unambiguous single words, matched case-insensitively.
// The label on the left is what gets reported.
const PHRASES: &[&str] = &[
    "World Bank",
    "International Monetary Fund",
    "United Nations",
    "World Health Organization",
    "International Labour Organization",
    "Food and Agriculture Organization",
    "African Development Bank",
    "Asian Development Bank",
    "Inter-American Development Bank",
    "Demographic and Health Surveys",
    "Living Standards Measurement Study",
    "World Development Indicators",
    "Enterprise Surveys",
    "Global Findex",
    "Penn World Table",
    "Eurostat",
    "Afrobarometer",
    "National Bureau of Statistics",
    "National Statistical Office",
    "National Statistics Office",
    "Bureau of Statistics",
    "Census Bureau",
    "Central Bank",
    "Ministry of Finance",
    "Ministry of Health",
    "Ministry of Education",
    "Ministry of Agriculture",
];

// Acronyms stay case-sensitive: "WHO" must not fire on the pronoun "who".
const ACRONYMS: &[&str] = &[
    "IMF", "UNICEF", "WHO", "ILO", "FAO", "OECD", "USAID", "LSMS", "DHS", "WDI",
];

static PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = PHRASES
        .iter()
        .map(|phrase| {
            phrase
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
});

static ACRONYM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", ACRONYMS.join("|"))).unwrap()
});

// Universities are the one whitelist family that can't be enumerated by
// name, so they match by shape: "University of X" (optional leading word,
// optional "the") or "X University". The capitalized-word requirement keeps
// precision; a bare "University" never counts.
static UNIVERSITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[A-Z][A-Za-z'-]+\s+)?University\s+of\s+(?:the\s+)?[A-Z][A-Za-z'-]*(?:\s+[A-Z][A-Za-z'-]*){0,2}\b|\b[A-Z][A-Za-z'-]+\s+University\b",
    )
    .unwrap()
});

static CANONICAL: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    PHRASES
        .iter()
        .map(|label| (label.to_lowercase(), *label))
        .collect()
});

/// Whitelisted institutions/programs in document order, as canonical
/// labels. An acronym and its spelled-out form count as distinct labels.
/// Raw output; dedup by label happens in the pipeline.
pub fn extract_source_mentions(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();
    for m in PHRASE_RE.find_iter(text) {
        found.push((m.start(), canonical_label(m.as_str())));
    }
    for m in ACRONYM_RE.find_iter(text) {
        found.push((m.start(), m.as_str().to_string()));
    }
    // Blank out phrase matches first so the university shape can't re-claim
    // part of one ("World Bank University"). Same-length fill keeps offsets.
    let masked = PHRASE_RE.replace_all(text, |caps: &regex::Captures| " ".repeat(caps[0].len()));
    for m in UNIVERSITY_RE.find_iter(&masked) {
        if let Some(label) = university_label(m.as_str()) {
            found.push((m.start(), label));
        }
    }
    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, label)| label).collect()
}

/// Map a raw phrase match back to its whitelist spelling.
fn canonical_label(matched: &str) -> String {
    let key = matched.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    CANONICAL
        .get(&key)
        .map(|label| label.to_string())
        .unwrap_or_else(|| matched.to_string())
}

/// Normalize a university match into a label: collapse whitespace, drop a
/// leading article, and reject anything reduced to the bare word.
fn university_label(matched: &str) -> Option<String> {
    let mut words: Vec<&str> = matched.split_whitespace().collect();
    if matches!(words.first(), Some(&"The" | &"A" | &"An")) {
        words.remove(0);
    }
    if words.len() < 2 {
        return None;
    }
    Some(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_match_is_case_insensitive_and_canonical() {
        let found = extract_source_mentions("Tables come from the world bank yearbook.");
        assert_eq!(found, vec!["World Bank"]);
    }

    #[test]
    fn mentions_keep_document_order() {
        let found =
            extract_source_mentions("Eurostat aggregates, then World Bank, then IMF releases.");
        assert_eq!(found, vec!["Eurostat", "World Bank", "IMF"]);
    }

    #[test]
    fn phrases_survive_line_wraps() {
        let found = extract_source_mentions("the World\nHealth Organization reported");
        assert_eq!(found, vec!["World Health Organization"]);
    }

    #[test]
    fn acronyms_are_case_sensitive() {
        assert!(extract_source_mentions("researchers who collected data").is_empty());
        assert!(extract_source_mentions("the whole imf story, lowercased").is_empty());
        assert_eq!(extract_source_mentions("per WHO guidance"), vec!["WHO"]);
    }

    #[test]
    fn acronym_and_long_form_are_distinct_labels() {
        let found =
            extract_source_mentions("the World Health Organization (WHO) recommends this");
        assert_eq!(found, vec!["World Health Organization", "WHO"]);
    }

    #[test]
    fn longer_phrases_are_not_split_into_shorter_ones() {
        let found = extract_source_mentions("the National Bureau of Statistics of Nigeria");
        assert_eq!(found, vec!["National Bureau of Statistics"]);
    }

    #[test]
    fn embedded_words_do_not_match() {
        assert!(extract_source_mentions("the Central Banker's memoir").is_empty());
        assert!(extract_source_mentions("whose data these are").is_empty());
    }

    #[test]
    fn unlisted_institutions_are_ignored() {
        assert!(extract_source_mentions("the Martian Statistics Agency").is_empty());
    }

    #[test]
    fn university_of_form_matches() {
        let found = extract_source_mentions("records archived at the University of Ghana in Accra");
        assert_eq!(found, vec!["University of Ghana"]);
    }

    #[test]
    fn named_university_form_matches() {
        let found = extract_source_mentions("a collaboration with Makerere University in 2012");
        assert_eq!(found, vec!["Makerere University"]);
    }

    #[test]
    fn leading_article_is_dropped_from_university_labels() {
        let found = extract_source_mentions("The University of Cape Coast hosted the workshop");
        assert_eq!(found, vec!["University of Cape Coast"]);
    }

    #[test]
    fn bare_university_is_ignored() {
        assert!(extract_source_mentions("enrolled at The University back then").is_empty());
        assert!(extract_source_mentions("a university degree").is_empty());
    }

    #[test]
    fn phrase_matches_are_masked_before_the_university_pass() {
        let found = extract_source_mentions("funded by the World Bank University program");
        assert_eq!(found, vec!["World Bank"]);
    }

    #[test]
    fn universities_sort_into_document_order() {
        let found =
            extract_source_mentions("Makerere University works with the World Bank and IMF");
        assert_eq!(found, vec!["Makerere University", "World Bank", "IMF"]);
    }
}
