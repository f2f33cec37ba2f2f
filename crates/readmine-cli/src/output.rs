//! Terminal/report output formatting.

use std::io::Write;
use std::time::Duration;

use owo_colors::OwoColorize;

use readmine_core::{ExtractionRecord, RunStats};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// One result line per file, used in verbose mode instead of the bar.
pub fn print_progress(
    w: &mut dyn Write,
    index: usize,
    total: usize,
    record: &ExtractionRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    let position = format!("[{}/{}]", index + 1, total);
    if let Some(err) = &record.error {
        if color.enabled() {
            writeln!(w, "{position} {} -> {} ({err})", record.file, "ERROR".red())?;
        } else {
            writeln!(w, "{position} {} -> ERROR ({err})", record.file)?;
        }
        return Ok(());
    }

    let counts = format!(
        "{} datasets, {} periods, {} urls, {} sources",
        record.dataset_candidates.len(),
        record.time_mentions.len(),
        record.urls.len(),
        record.source_mentions.len()
    );
    if record.needs_review {
        if color.enabled() {
            writeln!(
                w,
                "{position} {} -> {} ({counts})",
                record.file,
                "NEEDS REVIEW".yellow()
            )?;
        } else {
            writeln!(w, "{position} {} -> NEEDS REVIEW ({counts})", record.file)?;
        }
    } else if color.enabled() {
        writeln!(w, "{position} {} -> {} ({counts})", record.file, "OK".green())?;
    } else {
        writeln!(w, "{position} {} -> OK ({counts})", record.file)?;
    }
    Ok(())
}

/// Final batch summary block.
pub fn print_summary(
    w: &mut dyn Write,
    stats: &RunStats,
    elapsed: Duration,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "=".repeat(60))?;
    if color.enabled() {
        writeln!(w, "{}", "EXTRACTION SUMMARY".bold())?;
    } else {
        writeln!(w, "EXTRACTION SUMMARY")?;
    }
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "  Files processed:       {}", stats.processed)?;
    if stats.errors > 0 {
        if color.enabled() {
            writeln!(w, "  Failed conversions:    {}", stats.errors.red())?;
        } else {
            writeln!(w, "  Failed conversions:    {}", stats.errors)?;
        }
    }
    writeln!(w, "  With declaration:      {}", stats.with_declaration)?;
    writeln!(w, "  With data section:     {}", stats.with_section)?;
    writeln!(w, "  Dataset candidates:    {}", stats.dataset_mentions)?;
    writeln!(w, "  Time mentions:         {}", stats.time_mentions)?;
    writeln!(w, "  URLs:                  {}", stats.url_mentions)?;
    writeln!(w, "  Source mentions:       {}", stats.source_mentions)?;
    if stats.needs_review > 0 {
        if color.enabled() {
            writeln!(w, "  Needs review:          {}", stats.needs_review.yellow())?;
        } else {
            writeln!(w, "  Needs review:          {}", stats.needs_review)?;
        }
    } else {
        writeln!(w, "  Needs review:          0")?;
    }
    writeln!(w, "  Elapsed:               {:.1}s", elapsed.as_secs_f64())?;
    writeln!(w, "{}", "=".repeat(60))?;
    Ok(())
}

/// Detailed single-record view for `inspect`.
pub fn print_record(
    w: &mut dyn Write,
    record: &ExtractionRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "{}", "=".repeat(60))?;
    if color.enabled() {
        writeln!(w, "{}", record.file.bold())?;
    } else {
        writeln!(w, "{}", record.file)?;
    }
    writeln!(w, "{}", "=".repeat(60))?;

    if let Some(err) = &record.error {
        if color.enabled() {
            writeln!(w, "{}: {err}", "ERROR".red())?;
        } else {
            writeln!(w, "ERROR: {err}")?;
        }
        return Ok(());
    }

    match &record.declaration {
        Some(declaration) => writeln!(w, "Declaration: {}", truncate(declaration, 160))?,
        None => print_dimmed(w, "Declaration: none found", color)?,
    }
    match &record.availability_section {
        Some(section) => {
            let heading = section.lines().next().unwrap_or("");
            writeln!(w, "Section:     {heading}")?;
        }
        None => print_dimmed(w, "Section:     none found", color)?,
    }

    print_list(
        w,
        "Datasets",
        record.dataset_candidates.iter().map(|c| c.name.as_str()),
        color,
    )?;
    print_list(
        w,
        "Periods",
        record.time_mentions.iter().map(|m| m.value.as_str()),
        color,
    )?;
    print_list(w, "URLs", record.urls.iter().map(String::as_str), color)?;
    print_list(
        w,
        "Sources",
        record.source_mentions.iter().map(String::as_str),
        color,
    )?;

    if record.needs_review {
        if color.enabled() {
            writeln!(w, "{}", "NEEDS REVIEW".yellow())?;
        } else {
            writeln!(w, "NEEDS REVIEW")?;
        }
    }
    Ok(())
}

fn print_list<'a>(
    w: &mut dyn Write,
    title: &str,
    items: impl Iterator<Item = &'a str>,
    color: ColorMode,
) -> std::io::Result<()> {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        return print_dimmed(w, &format!("{title}: none"), color);
    }
    writeln!(w, "{title}:")?;
    for item in items {
        writeln!(w, "  - {}", truncate(item, 100))?;
    }
    Ok(())
}

fn print_dimmed(w: &mut dyn Write, msg: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", msg.dimmed())
    } else {
        writeln!(w, "{msg}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
