//! Batch-level summary charts, rendered as standalone SVG files.
//!
//! Six charts mirror the shape of a run: top sources, top datasets, top URL
//! domains, URLs-per-file distribution, year distribution and the review
//! split. Charts whose underlying counter is empty are skipped rather than
//! rendered blank.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use readmine_core::ExtractionRecord;

use crate::{ReportError, domain_of};

const TOP_K: usize = 20;
const BAR_FILL: &str = "#4878a8";

// Years are re-counted from the exported mention values, so a range like
// "2010-2019" contributes both endpoints to the distribution.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

/// Render the summary charts into `out_dir` (created if missing) and
/// return the paths written.
pub fn render_charts(
    records: &[ExtractionRecord],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(out_dir)?;

    let mut sources = Counter::default();
    let mut datasets = Counter::default();
    let mut domains = Counter::default();
    let mut urls_per_file = Counter::default();
    let mut years = Counter::default();
    let mut review = Counter::default();

    for record in records {
        for label in &record.source_mentions {
            sources.add(label);
        }
        for candidate in &record.dataset_candidates {
            datasets.add(&candidate.name);
        }
        for url in &record.urls {
            if let Some(domain) = domain_of(url) {
                domains.add(&domain);
            }
        }
        urls_per_file.add(&record.urls.len().to_string());
        for mention in &record.time_mentions {
            for caps in YEAR_RE.captures_iter(&mention.value) {
                years.add(&caps[1]);
            }
        }
        review.add(if record.needs_review { "needs review" } else { "ok" });
    }

    let mut written = Vec::new();
    let mut write = |name: &str, svg: String| -> Result<(), ReportError> {
        let path = out_dir.join(name);
        std::fs::write(&path, svg)?;
        written.push(path);
        Ok(())
    };

    if !sources.is_empty() {
        write("sources_top20.svg", barh_svg("Top sources", &sources.top(TOP_K)))?;
    }
    if !datasets.is_empty() {
        write(
            "datasets_top20.svg",
            barh_svg("Top dataset candidates", &datasets.top(TOP_K)),
        )?;
    }
    if !domains.is_empty() {
        write("domains_top20.svg", barh_svg("Top URL domains", &domains.top(TOP_K)))?;
    }
    if !records.is_empty() {
        write(
            "urls_per_file_hist.svg",
            column_svg("URLs per file", &urls_per_file.sorted_by_label(), "URLs in record"),
        )?;
    }
    // a single distinct year makes a meaningless histogram
    if years.distinct() >= 2 {
        write(
            "years_hist.svg",
            column_svg("Years mentioned", &years.sorted_by_label(), "year"),
        )?;
    }
    if !records.is_empty() {
        write(
            "needs_review_bar.svg",
            column_svg("Review split", &review.sorted_by_label(), "flag"),
        )?;
    }

    Ok(written)
}

#[derive(Default)]
struct Counter {
    counts: HashMap<String, usize>,
}

impl Counter {
    fn add(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Highest counts first; ties break on the label so output is stable.
    fn top(&self, k: usize) -> Vec<(String, usize)> {
        let mut items: Vec<_> = self
            .counts
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        items.truncate(k);
        items
    }

    fn sorted_by_label(&self) -> Vec<(String, usize)> {
        let mut items: Vec<_> = self
            .counts
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .collect();
        // numeric labels sort numerically, everything else lexically
        items.sort_by(|a, b| match (a.0.parse::<u64>(), b.0.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.0.cmp(&b.0),
        });
        items
    }
}

/// Horizontal bar chart for top-k label counts.
fn barh_svg(title: &str, items: &[(String, usize)]) -> String {
    let max = items.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let row_h = 24;
    let height = 44 + items.len() * row_h;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="900" height="{height}" font-family="sans-serif" font-size="12">"#
    );
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="10" y="24" font-size="16" font-weight="bold">{}</text>"#,
        xml_escape(title)
    ));
    svg.push('\n');
    for (i, (label, value)) in items.iter().enumerate() {
        let y = 40 + i * row_h;
        let w = ((*value as f64 / max as f64) * 580.0).round() as usize;
        svg.push_str(&format!(
            r#"<text x="270" y="{}" text-anchor="end">{}</text>"#,
            y + 16,
            xml_escape(&truncate_label(label, 38))
        ));
        svg.push_str(&format!(
            r#"<rect x="280" y="{}" width="{}" height="16" fill="{BAR_FILL}"/>"#,
            y + 4,
            w.max(1)
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}">{}</text>"#,
            286 + w,
            y + 16,
            value
        ));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

/// Vertical bar chart for small distributions.
fn column_svg(title: &str, items: &[(String, usize)], x_label: &str) -> String {
    let max = items.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let bar_w = 34;
    let gap = 10;
    let width = (60 + items.len() * (bar_w + gap) + 20).max(320);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="360" font-family="sans-serif" font-size="12">"#
    );
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="10" y="24" font-size="16" font-weight="bold">{}</text>"#,
        xml_escape(title)
    ));
    svg.push('\n');
    for (i, (label, value)) in items.iter().enumerate() {
        let h = ((*value as f64 / max as f64) * 260.0).round() as usize;
        let x = 60 + i * (bar_w + gap);
        let y = 320 - h.max(1);
        svg.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{bar_w}" height="{}" fill="{BAR_FILL}"/>"#,
            h.max(1)
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            x + bar_w / 2,
            y.saturating_sub(6),
            value
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="338" text-anchor="middle">{}</text>"#,
            x + bar_w / 2,
            xml_escape(label)
        ));
        svg.push('\n');
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="356" text-anchor="middle" font-style="italic">{}</text>"#,
        width / 2,
        xml_escape(x_label)
    ));
    svg.push_str("</svg>\n");
    svg
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn truncate_label(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
