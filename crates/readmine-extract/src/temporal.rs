//! Data-collection-period mentions: year ranges, month-year pairs, years.

use once_cell::sync::Lazy;
use regex::Regex;

use readmine_core::{TemporalKind, TemporalMention};

// Plausibility window 1900-2099 is baked into the year atom.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:19|20)\d{2})\s*[-\u{2013}]\s*((?:19|20)\d{2})\b").unwrap()
});

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?i:January|February|March|April|May|June|July|August|September|October|November|December))\s+((?:19|20)\d{2})\b",
    )
    .unwrap()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

/// Extract temporal mentions from one scope.
///
/// Passes run in precedence order: ranges, then month-year pairs, then bare
/// years. Each pass blanks out its matches before the next runs, so the
/// endpoints of "2010-2019" are never re-reported as bare years. Values are
/// canonical ("2010-2019" regardless of dash spacing); duplicates survive
/// here and are removed in the pipeline.
pub fn extract_time_mentions(text: &str) -> Vec<TemporalMention> {
    let mut out = Vec::new();

    for caps in RANGE_RE.captures_iter(text) {
        out.push(TemporalMention::new(
            format!("{}-{}", &caps[1], &caps[2]),
            TemporalKind::YearRange,
        ));
    }
    let masked = mask_matches(text, &RANGE_RE);

    for caps in MONTH_YEAR_RE.captures_iter(&masked) {
        out.push(TemporalMention::new(
            format!("{} {}", &caps[1], &caps[2]),
            TemporalKind::MonthYear,
        ));
    }
    let masked = mask_matches(&masked, &MONTH_YEAR_RE);

    for caps in YEAR_RE.captures_iter(&masked) {
        out.push(TemporalMention::new(
            caps[1].to_string(),
            TemporalKind::SingleYear,
        ));
    }

    out
}

/// Blank out every match with spaces of the same byte length, keeping the
/// rest of the text and its offsets untouched.
fn mask_matches(text: &str, re: &Regex) -> String {
    re.replace_all(text, |caps: &regex::Captures| " ".repeat(caps[0].len()))
        .into_owned()
}
