//! Dataset name candidates: quoted titles, keyword phrases, data file names.

use once_cell::sync::Lazy;
use regex::Regex;

use readmine_core::{DatasetCandidate, DatasetForm};

const KEYWORD_ALT: &str =
    r"dataset|data[ \t]+set|database|corpus|survey|panel|registry|index|indicator";

// Quoted title with a keyword at most 40 characters before it.
static QUOTED_AFTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b(?i:{KEYWORD_ALT})\b[^"“”\n]{{0,40}}["“]([^"“”\n]{{2,80}})["”]"#
    ))
    .unwrap()
});

// Quoted title with a keyword at most 40 characters after it.
static QUOTED_BEFORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"["“]([^"“”\n]{{2,80}})["”][^"“”\n]{{0,40}}\b(?i:{KEYWORD_ALT})\b"#
    ))
    .unwrap()
});

// Capitalized phrase directly after a keyword. The class keeps the capture
// inside one clause; stop words are cut afterwards.
static KEYWORD_FORM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?i:{KEYWORD_ALT})\b[ \t]+([A-Z][^\n;:,().]{{1,80}})"
    ))
    .unwrap()
});

static STOP_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:was|were|collected|from)\b").unwrap());

static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w[\w.-]*\.(?i:csv|dta|xlsx|tsv|zip|rds)\b").unwrap());

/// Quoted dataset titles with a keyword nearby, in document order.
pub fn quoted_candidates(text: &str) -> Vec<DatasetCandidate> {
    let mut out = Vec::new();
    for caps in QUOTED_AFTER_RE.captures_iter(text) {
        if let Some(name) = clean_name(&caps[1]) {
            out.push(DatasetCandidate::new(name, DatasetForm::Quoted));
        }
    }
    for caps in QUOTED_BEFORE_RE.captures_iter(text) {
        if let Some(name) = clean_name(&caps[1]) {
            out.push(DatasetCandidate::new(name, DatasetForm::Quoted));
        }
    }
    out
}

/// Capitalized phrases following a dataset keyword, cut at stop words.
pub fn keyword_candidates(text: &str) -> Vec<DatasetCandidate> {
    KEYWORD_FORM_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let raw = &caps[1];
            let cut = STOP_WORD_RE.find(raw).map(|m| m.start()).unwrap_or(raw.len());
            clean_name(&raw[..cut])
        })
        .map(|name| DatasetCandidate::new(name, DatasetForm::Keyword))
        .collect()
}

/// Data file names with a recognized extension.
pub fn filename_candidates(text: &str) -> Vec<DatasetCandidate> {
    FILENAME_RE
        .find_iter(text)
        .map(|m| DatasetCandidate::new(m.as_str(), DatasetForm::Filename))
        .collect()
}

/// All three forms over one scope, pooled in form order.
pub fn extract_datasets(scope: &str) -> Vec<DatasetCandidate> {
    let mut out = quoted_candidates(scope);
    out.extend(keyword_candidates(scope));
    out.extend(filename_candidates(scope));
    out
}

/// Section candidates first, then full-document candidates. Raw pooled
/// output; first-occurrence dedup happens in the pipeline, so section
/// findings survive a later full-document duplicate.
pub fn collect_datasets(section: Option<&str>, full: &str) -> Vec<DatasetCandidate> {
    let mut out = Vec::new();
    if let Some(scope) = section {
        out.extend(extract_datasets(scope));
    }
    out.extend(extract_datasets(full));
    out
}

fn clean_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':'))
        .trim_end();
    if name.chars().count() < 2 {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(candidates: &[DatasetCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn quoted_title_after_keyword() {
        let found = quoted_candidates(r#"We use the dataset "LSMS 2019" throughout."#);
        assert_eq!(names(&found), vec!["LSMS 2019"]);
        assert_eq!(found[0].form, DatasetForm::Quoted);
    }

    #[test]
    fn quoted_title_before_keyword() {
        let found = quoted_candidates(r#"The "Global Findex" database covers 140 economies."#);
        assert_eq!(names(&found), vec!["Global Findex"]);
    }

    #[test]
    fn curly_quotes_are_recognized() {
        let found = quoted_candidates("Our survey \u{201C}Afrobarometer Round 8\u{201D} ran in 2021.");
        assert_eq!(names(&found), vec!["Afrobarometer Round 8"]);
    }

    #[test]
    fn quotes_without_a_nearby_keyword_are_ignored() {
        let found = quoted_candidates(r#"He said "hello there" and left."#);
        assert!(found.is_empty());
    }

    #[test]
    fn keyword_phrase_stops_at_stop_words() {
        let found = keyword_candidates("The survey Living Standards Measurement Study was fielded.");
        assert_eq!(names(&found), vec!["Living Standards Measurement Study"]);
        assert_eq!(found[0].form, DatasetForm::Keyword);
    }

    #[test]
    fn keyword_phrase_stops_at_punctuation() {
        let found = keyword_candidates("the registry NPR; see below");
        assert_eq!(names(&found), vec!["NPR"]);
    }

    #[test]
    fn keyword_requires_a_capitalized_phrase() {
        assert!(keyword_candidates("the dataset was large").is_empty());
        assert!(keyword_candidates("a database of firms").is_empty());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let found = keyword_candidates("DATABASE Compustat holds the fundamentals");
        assert_eq!(names(&found), vec!["Compustat holds the fundamentals"]);
    }

    #[test]
    fn two_word_keyword_form() {
        let found = keyword_candidates("the data set PSID tracks families");
        assert_eq!(names(&found), vec!["PSID tracks families"]);
    }

    #[test]
    fn filenames_with_known_extensions() {
        let found = filename_candidates("Run on panel_2020.dta, then merge firms.csv and raw.zip.");
        assert_eq!(names(&found), vec!["panel_2020.dta", "firms.csv", "raw.zip"]);
        assert!(found.iter().all(|c| c.form == DatasetForm::Filename));
    }

    #[test]
    fn filename_extension_is_case_insensitive() {
        let found = filename_candidates("see EXPORT.XLSX for details");
        assert_eq!(names(&found), vec!["EXPORT.XLSX"]);
    }

    #[test]
    fn unknown_extensions_are_ignored() {
        assert!(filename_candidates("see notes.txt and main.pdf").is_empty());
    }

    #[test]
    fn multipart_filenames_keep_their_dots() {
        let found = filename_candidates("archive v2.1-extract.csv is final");
        assert_eq!(names(&found), vec!["v2.1-extract.csv"]);
    }

    #[test]
    fn too_short_names_are_discarded() {
        assert!(keyword_candidates("the index P was computed").is_empty());
    }

    #[test]
    fn section_candidates_come_before_full_document_ones() {
        let section = "Data sources\nWe use the dataset \"Alpha\".";
        let full = "Intro mentions the dataset \"Beta\".\n\nData sources\nWe use the dataset \"Alpha\".";
        let pooled = collect_datasets(Some(section), full);
        let pooled_names = names(&pooled);
        assert_eq!(pooled_names[0], "Alpha");
        assert!(pooled_names.contains(&"Beta"));
    }
}
