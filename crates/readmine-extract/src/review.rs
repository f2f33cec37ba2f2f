//! The needs-review flag.

use readmine_core::{DatasetCandidate, TemporalMention};

/// Flag a record for human review when key evidence is missing.
///
/// A record is low-evidence when any of these hold: no declaration was
/// found; neither an availability section nor any dataset candidate was
/// found; no URL was found; no temporal mention was found. The flag marks
/// thin extractions, not errors.
pub fn needs_review(
    declaration: Option<&str>,
    section: Option<&str>,
    datasets: &[DatasetCandidate],
    times: &[TemporalMention],
    urls: &[String],
) -> bool {
    declaration.is_none()
        || (section.is_none() && datasets.is_empty())
        || urls.is_empty()
        || times.is_empty()
}
