//! End-to-end tests for the extraction pipeline on README-style fixtures.
//!
//! Each fixture is raw converter output, artifacts included, so these tests
//! exercise normalization, section scoping, every extractor and the final
//! record in one pass.

use readmine_extract::{Document, process_document};

/// A well-behaved replication-package README with every kind of evidence.
const FULL_README: &str = "README for replication package\n\n\
We certify that the data and code in this package repro-\n\
duce every table in the paper.\n\n\
1. Overview\n\
The package builds all tables from the household panel.\n\n\
3. Data Availability\n\
The dataset \"Village Census 2018\" was collected from the National\n\
Bureau of Statistics and is mirrored at\n\
https://data.example.org/village-census.\n\
Survey waves cover 2015-2018; the refresher ran in March 2019.\n\
Derived files: households.csv and plots.dta.\n\n\
4. Contact\n\
Write to the authors for the survey Pilot Extract, which is not\n\
public. See https://osf.io/xyz98 (archive) or 2019 notes.\n";

#[test]
fn full_readme_produces_a_complete_record() {
    let doc = Document::new("village_README.pdf", FULL_README);
    let record = process_document(&doc);

    assert_eq!(record.file, "village_README.pdf");
    assert!(record.error.is_none());

    // hyphen wrap healed by normalization
    assert_eq!(
        record.declaration.as_deref(),
        Some("We certify that the data and code in this package reproduce every table in the paper.")
    );

    let section = record.availability_section.as_deref().unwrap();
    assert!(section.starts_with("3. Data Availability"));
    assert!(section.contains("households.csv"));
    assert!(!section.contains("4. Contact"));
}

#[test]
fn full_readme_pools_datasets_section_first() {
    let doc = Document::new("village_README.pdf", FULL_README);
    let record = process_document(&doc);

    let names: Vec<&str> = record
        .dataset_candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Village Census 2018",
            "households.csv",
            "plots.dta",
            "Pilot Extract",
        ]
    );
}

#[test]
fn full_readme_narrows_scoped_extractors_to_the_section() {
    let doc = Document::new("village_README.pdf", FULL_README);
    let record = process_document(&doc);

    let times: Vec<&str> = record.time_mentions.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(times, vec!["2015-2018", "March 2019", "2018"]);

    // the osf.io link lives outside the availability section
    assert_eq!(record.urls, vec!["https://data.example.org/village-census"]);

    // phrase spans the line break inside the section
    assert_eq!(record.source_mentions, vec!["National Bureau of Statistics"]);

    assert!(!record.needs_review);
}

#[test]
fn document_without_section_falls_back_to_full_text() {
    let text = "Archive notes.\n\
Collected during 2001 for the pilot.\n\
Mirror at https://mirror.example.net/pilot.zip today.\n";
    let record = process_document(&Document::new("notes.pdf", text));

    assert!(record.availability_section.is_none());
    let times: Vec<&str> = record.time_mentions.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(times, vec!["2001"]);
    assert_eq!(record.urls, vec!["https://mirror.example.net/pilot.zip"]);
}

#[test]
fn thin_document_is_flagged_for_review() {
    let text = "Shipping manifest\n\
Boxes leave the warehouse on Tuesdays.\n\
Contact logistics at https://example.org/help for questions.\n";
    let record = process_document(&Document::new("manifest.pdf", text));

    assert!(record.declaration.is_none());
    assert!(record.availability_section.is_none());
    assert!(record.dataset_candidates.is_empty());
    assert!(record.time_mentions.is_empty());
    assert_eq!(record.urls, vec!["https://example.org/help"]);
    assert!(record.needs_review);
    assert!(record.error.is_none());
}

#[test]
fn dataset_names_dedup_case_insensitively_across_scopes() {
    let text = "Data Availability\n\
We use the dataset \"Alpha Panel\" here.\n\n\
Later the DATASET \"ALPHA PANEL\" appears again, plus the dataset \"Beta\".\n";
    let record = process_document(&Document::new("dup.pdf", text));

    let names: Vec<&str> = record
        .dataset_candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha Panel", "Beta"]);
}

#[test]
fn urls_dedup_exactly_but_not_across_case() {
    let text = "See https://x.org/a then https://x.org/a then https://X.org/a done.\n";
    let record = process_document(&Document::new("urls.pdf", text));
    assert_eq!(record.urls, vec!["https://x.org/a", "https://X.org/a"]);
}

#[test]
fn source_labels_dedup_by_canonical_form() {
    let text = "The World Bank, the world bank and the WORLD BANK all appear; IMF too.\n";
    let record = process_document(&Document::new("sources.pdf", text));
    assert_eq!(record.source_mentions, vec!["World Bank", "IMF"]);
}
