//! CSV and JSONL export with list flattening.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use readmine_core::ExtractionRecord;

use crate::ReportError;

/// Separator for joined list fields at the export boundary.
pub const LIST_SEPARATOR: &str = "; ";

/// Column order, shared by the CSV header and the JSONL objects.
pub const COLUMNS: [&str; 9] = [
    "file",
    "declaration",
    "availability_section",
    "dataset_candidates",
    "time_mentions",
    "urls",
    "sources_mentions",
    "needs_review",
    "error",
];

/// One record with every list joined to a single string.
///
/// Built at write time only; in-memory records stay structured. A reloaded
/// joined field is an opaque scalar and is never split back into a list.
#[derive(Debug, Clone, Serialize)]
pub struct FlatRecord {
    pub file: String,
    pub declaration: Option<String>,
    pub availability_section: Option<String>,
    pub dataset_candidates: String,
    pub time_mentions: String,
    pub urls: String,
    pub sources_mentions: String,
    pub needs_review: bool,
    pub error: Option<String>,
}

impl FlatRecord {
    pub fn from_record(record: &ExtractionRecord) -> Self {
        Self {
            file: record.file.clone(),
            declaration: record.declaration.clone(),
            availability_section: record.availability_section.clone(),
            dataset_candidates: join_list(
                record.dataset_candidates.iter().map(|c| c.name.as_str()),
            ),
            time_mentions: join_list(record.time_mentions.iter().map(|m| m.value.as_str())),
            urls: join_list(record.urls.iter().map(String::as_str)),
            sources_mentions: join_list(record.source_mentions.iter().map(String::as_str)),
            needs_review: record.needs_review,
            error: record.error.clone(),
        }
    }
}

fn join_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(LIST_SEPARATOR)
}

/// Write the CSV report: header row, then one row per record in input order.
pub fn write_csv(w: &mut dyn Write, records: &[ExtractionRecord]) -> Result<(), ReportError> {
    writeln!(w, "{}", COLUMNS.join(","))?;
    for record in records {
        let flat = FlatRecord::from_record(record);
        let row = [
            csv_escape(&flat.file),
            csv_escape(flat.declaration.as_deref().unwrap_or("")),
            csv_escape(flat.availability_section.as_deref().unwrap_or("")),
            csv_escape(&flat.dataset_candidates),
            csv_escape(&flat.time_mentions),
            csv_escape(&flat.urls),
            csv_escape(&flat.sources_mentions),
            flat.needs_review.to_string(),
            csv_escape(flat.error.as_deref().unwrap_or("")),
        ];
        writeln!(w, "{}", row.join(","))?;
    }
    Ok(())
}

/// Write the JSONL report: one flattened object per line.
pub fn write_jsonl(w: &mut dyn Write, records: &[ExtractionRecord]) -> Result<(), ReportError> {
    for record in records {
        let flat = FlatRecord::from_record(record);
        let line = serde_json::to_string(&flat)?;
        writeln!(w, "{line}")?;
    }
    Ok(())
}

/// Write the CSV report to a file path.
pub fn export_csv(path: &Path, records: &[ExtractionRecord]) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(&mut file, records)
}

/// Write the JSONL report to a file path.
pub fn export_jsonl(path: &Path, records: &[ExtractionRecord]) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;
    write_jsonl(&mut file, records)
}

/// Quote a field when it contains a comma, quote or newline; embedded
/// quotes are doubled.
fn csv_escape(field: &str) -> String {
    if field.contains('"') || field.contains(',') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
