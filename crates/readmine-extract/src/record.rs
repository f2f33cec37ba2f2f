//! Final record composition. Pure assembly, no extraction logic.

use readmine_core::{DatasetCandidate, ExtractionRecord, TemporalMention};

/// Build the output record from already-extracted parts.
#[allow(clippy::too_many_arguments)]
pub fn assemble_record(
    file: impl Into<String>,
    declaration: Option<String>,
    availability_section: Option<String>,
    dataset_candidates: Vec<DatasetCandidate>,
    time_mentions: Vec<TemporalMention>,
    urls: Vec<String>,
    source_mentions: Vec<String>,
    needs_review: bool,
) -> ExtractionRecord {
    ExtractionRecord {
        file: file.into(),
        declaration,
        availability_section,
        dataset_candidates,
        time_mentions,
        urls,
        source_mentions,
        needs_review,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmine_core::{DatasetForm, TemporalKind};

    #[test]
    fn carries_every_field_through() {
        let record = assemble_record(
            "study_README.pdf",
            Some("We certify the data.".to_string()),
            Some("Data Availability\nOn request.".to_string()),
            vec![DatasetCandidate::new("Alpha", DatasetForm::Quoted)],
            vec![TemporalMention::new("2019", TemporalKind::SingleYear)],
            vec!["https://example.org".to_string()],
            vec!["World Bank".to_string()],
            false,
        );
        assert_eq!(record.file, "study_README.pdf");
        assert_eq!(record.declaration.as_deref(), Some("We certify the data."));
        assert_eq!(record.dataset_candidates.len(), 1);
        assert_eq!(record.time_mentions[0].value, "2019");
        assert_eq!(record.urls[0], "https://example.org");
        assert_eq!(record.source_mentions[0], "World Bank");
        assert!(!record.needs_review);
        assert!(record.error.is_none());
    }
}
