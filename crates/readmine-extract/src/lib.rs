//! Pattern-based fact extraction from README-style document text.
//!
//! Every stage is pure: [`normalize::normalize`] canonicalizes the text,
//! [`section::find_availability_section`] picks the extraction scope, the
//! entity extractors run independently over their scopes, and
//! [`process_document`] wires them together into one record. Nothing here
//! does I/O, so the whole pipeline is testable on string fixtures and safe
//! to run on any number of documents in parallel.

pub mod dataset;
pub mod declaration;
pub mod dedup;
pub mod institution;
pub mod normalize;
pub mod record;
pub mod review;
pub mod section;
pub mod temporal;
pub mod url;

pub use dataset::{collect_datasets, extract_datasets};
pub use declaration::find_declaration;
pub use dedup::dedup_first;
pub use institution::extract_source_mentions;
pub use normalize::normalize;
pub use record::assemble_record;
pub use review::needs_review;
pub use section::{Section, find_availability_section};
pub use temporal::extract_time_mentions;
pub use url::extract_urls;

use readmine_core::ExtractionRecord;

/// A document ready for extraction.
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identity, normally the input file name.
    pub id: String,
    /// Text as the converter produced it.
    pub raw: String,
    /// Normalized text; everything downstream reads this.
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = normalize::normalize(&raw);
        Self {
            id: id.into(),
            raw,
            text,
        }
    }
}

/// Run the full pipeline over one document.
///
/// The declaration is searched document-wide since it usually sits on a
/// title page. Datasets pool the section scope (when found) with the full
/// document, section findings first. Temporal mentions, URLs and source
/// institutions narrow to the section when one was found and otherwise use
/// the whole text. All lists are first-occurrence deduplicated.
pub fn process_document(doc: &Document) -> ExtractionRecord {
    let section = section::find_availability_section(&doc.text);
    let declaration = declaration::find_declaration(&doc.text);

    let section_text = section.as_ref().map(|s| s.text.as_str());
    let scope = section_text.unwrap_or(&doc.text);

    let datasets = dedup::dedup_first(
        dataset::collect_datasets(section_text, &doc.text),
        |candidate| candidate.name.to_lowercase(),
    );
    let times = dedup::dedup_first(temporal::extract_time_mentions(scope), |mention| {
        mention.value.clone()
    });
    let urls = dedup::dedup_first(url::extract_urls(scope), |u| u.clone());
    let sources = dedup::dedup_first(institution::extract_source_mentions(scope), |s| s.clone());

    let flagged = review::needs_review(
        declaration.as_deref(),
        section_text,
        &datasets,
        &times,
        &urls,
    );

    record::assemble_record(
        doc.id.clone(),
        declaration,
        section.map(|s| s.text),
        datasets,
        times,
        urls,
        sources,
        flagged,
    )
}
