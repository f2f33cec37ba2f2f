use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use readmine_core::{
    ExtractionRecord, PdfBackend, ProcessFn, ProgressEvent, RunConfig, SampleMode, config_file,
    discover_files, run_batch, select_sample, write_manifest,
};
use readmine_extract::Document;
use readmine_pdf::ConversionChain;

mod output;

use output::ColorMode;

/// Pull declarations, datasets, collection periods, sources and URLs out of
/// README-style PDF documents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a directory of README PDFs into CSV/JSONL records
    Run {
        /// Directory containing the PDF files (or set input.input_dir in config)
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// File-name glob for discovery (default: *.pdf)
        #[arg(long)]
        glob: Option<String>,

        /// Directory for results, manifest, charts and saved text (default: outputs)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// CSV output path (default: <out-dir>/results.csv)
        #[arg(long)]
        out_csv: Option<PathBuf>,

        /// JSONL output path (default: <out-dir>/results.jsonl)
        #[arg(long)]
        out_jsonl: Option<PathBuf>,

        /// Save each document's normalized text under <out-dir>/text/
        #[arg(long)]
        save_text: bool,

        /// Cap on the number of files to process, 0 = no cap (default: 0)
        #[arg(long)]
        max_samples: Option<usize>,

        /// How to pick files when --max-samples caps the batch (default: random)
        #[arg(long, value_enum)]
        sample_mode: Option<SampleModeArg>,

        /// Seed for random sampling (default: 42)
        #[arg(long)]
        seed: Option<u64>,

        /// Concurrent workers (default: available parallelism)
        #[arg(long)]
        workers: Option<usize>,

        /// Render summary charts into <out-dir>/charts/
        #[arg(long)]
        viz: bool,

        /// Print one result line per file instead of the progress bar
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a single PDF and print the full record
    Inspect {
        /// Path to the PDF file
        file: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleModeArg {
    Random,
    First,
}

impl From<SampleModeArg> for SampleMode {
    fn from(mode: SampleModeArg) -> Self {
        match mode {
            SampleModeArg::Random => SampleMode::Random,
            SampleModeArg::First => SampleMode::First,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            input_dir,
            glob,
            out_dir,
            out_csv,
            out_jsonl,
            save_text,
            max_samples,
            sample_mode,
            seed,
            workers,
            viz,
            verbose,
            no_color,
            output,
        } => {
            run(
                input_dir,
                glob,
                out_dir,
                out_csv,
                out_jsonl,
                save_text,
                max_samples,
                sample_mode,
                seed,
                workers,
                viz,
                verbose,
                no_color,
                output,
            )
            .await
        }
        Command::Inspect { file, no_color } => inspect(&file, no_color),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run(
    input_dir: Option<PathBuf>,
    glob: Option<String>,
    out_dir: Option<PathBuf>,
    out_csv: Option<PathBuf>,
    out_jsonl: Option<PathBuf>,
    save_text: bool,
    max_samples: Option<usize>,
    sample_mode: Option<SampleModeArg>,
    seed: Option<u64>,
    workers: Option<usize>,
    viz: bool,
    verbose: bool,
    no_color: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    // flag > config file > built-in default
    let file_cfg = config_file::load_config();
    let input_cfg = file_cfg.input.clone().unwrap_or_default();
    let output_cfg = file_cfg.output.clone().unwrap_or_default();
    let sampling_cfg = file_cfg.sampling.clone().unwrap_or_default();
    let concurrency_cfg = file_cfg.concurrency.clone().unwrap_or_default();

    let Some(input_dir) = input_dir.or(input_cfg.input_dir.map(PathBuf::from)) else {
        anyhow::bail!("--input-dir is required (flag or config file)");
    };
    if !input_dir.is_dir() {
        anyhow::bail!("input directory not found: {}", input_dir.display());
    }
    let glob = glob
        .or(input_cfg.glob)
        .unwrap_or_else(|| "*.pdf".to_string());

    let out_dir = out_dir
        .or(output_cfg.out_dir.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("outputs"));
    std::fs::create_dir_all(&out_dir)?;
    let out_csv = out_csv
        .or(output_cfg.out_csv.map(PathBuf::from))
        .unwrap_or_else(|| out_dir.join("results.csv"));
    let out_jsonl = out_jsonl
        .or(output_cfg.out_jsonl.map(PathBuf::from))
        .unwrap_or_else(|| out_dir.join("results.jsonl"));
    let save_text = save_text || output_cfg.save_text.unwrap_or(false);
    let viz = viz || output_cfg.viz.unwrap_or(false);

    let defaults = RunConfig::default();
    let config = RunConfig {
        num_workers: workers
            .or(concurrency_cfg.num_workers)
            .unwrap_or(defaults.num_workers),
        max_samples: max_samples
            .or(sampling_cfg.max_samples)
            .unwrap_or(defaults.max_samples),
        sample_mode: sample_mode
            .map(SampleMode::from)
            .or(sampling_cfg.sample_mode)
            .unwrap_or(defaults.sample_mode),
        seed: seed.or(sampling_cfg.seed).unwrap_or(defaults.seed),
    };

    let discovered = discover_files(&input_dir, &glob)?;
    if discovered.is_empty() {
        anyhow::bail!(
            "no files matching {:?} under {}",
            glob,
            input_dir.display()
        );
    }
    let discovered_count = discovered.len();
    let files = select_sample(
        discovered,
        config.max_samples,
        config.sample_mode,
        config.seed,
    );
    if files.len() < discovered_count {
        let manifest = out_dir.join("sample_manifest.txt");
        write_manifest(&files, &manifest)?;
        tracing::info!(
            selected = files.len(),
            discovered = discovered_count,
            manifest = %manifest.display(),
            "sampling capped the batch"
        );
    }
    let total = files.len();

    let mut chain = ConversionChain::standard();
    if let Some(min_text_len) = concurrency_cfg.min_text_len {
        chain = chain.with_min_text_len(min_text_len);
    }
    let chain = Arc::new(chain);

    let text_dir = save_text.then(|| out_dir.join("text"));
    if let Some(dir) = &text_dir {
        std::fs::create_dir_all(dir)?;
    }

    let process: ProcessFn = {
        let chain = chain.clone();
        let text_dir = text_dir.clone();
        Arc::new(move |path: &Path| process_one(path, &chain, text_dir.as_deref()))
    };

    let color = ColorMode(!no_color && output.is_none());
    let writer: Box<dyn Write + Send> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    let writer = Arc::new(Mutex::new(writer));

    let bar = if verbose {
        None
    } else {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} [{bar:40.cyan/dim}] {pos}/{len} files ({eta}) {msg}",
            )
            .unwrap()
            .progress_chars("=> "),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let progress = {
        let bar = bar.clone();
        let writer = writer.clone();
        move |event: ProgressEvent| match event {
            ProgressEvent::Processing { file, .. } => {
                if let Some(pb) = &bar {
                    pb.set_message(file);
                }
            }
            ProgressEvent::Completed {
                index,
                total,
                record,
            } => {
                if let Some(pb) = &bar {
                    if let Some(err) = &record.error {
                        pb.println(format!("ERROR {}: {err}", record.file));
                    }
                    pb.inc(1);
                } else {
                    let mut w = writer.lock().unwrap_or_else(|p| p.into_inner());
                    let _ = output::print_progress(&mut **w, index, total, &record, color);
                    let _ = w.flush();
                }
            }
        }
    };

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    let started = Instant::now();
    let (records, stats) = run_batch(files, process, &config, progress, cancel.clone()).await;
    if let Some(pb) = &bar {
        pb.finish_and_clear();
    }

    readmine_reporting::export_csv(&out_csv, &records)?;
    readmine_reporting::export_jsonl(&out_jsonl, &records)?;

    let charts_dir = out_dir.join("charts");
    let chart_outcome = viz.then(|| readmine_reporting::render_charts(&records, &charts_dir));

    let mut w = writer.lock().unwrap_or_else(|p| p.into_inner());
    if cancel.is_cancelled() {
        writeln!(
            w,
            "Interrupted: {} of {} documents processed",
            records.len(),
            total
        )?;
    }
    output::print_summary(&mut **w, &stats, started.elapsed(), color)?;
    writeln!(
        w,
        "Wrote {} records to {} and {}",
        records.len(),
        out_csv.display(),
        out_jsonl.display()
    )?;
    match chart_outcome {
        Some(Ok(paths)) if !paths.is_empty() => {
            writeln!(w, "Charts: {} files in {}", paths.len(), charts_dir.display())?;
        }
        Some(Ok(_)) => {}
        Some(Err(err)) => {
            tracing::warn!(error = %err, "chart rendering skipped");
            writeln!(w, "WARNING: charts skipped: {err}")?;
        }
        None => {}
    }
    w.flush()?;

    Ok(())
}

/// Per-document work: convert through the chain, optionally save the
/// normalized text, then run the extraction pipeline. Conversion failures
/// become failed records so the batch keeps going.
fn process_one(path: &Path, chain: &ConversionChain, text_dir: Option<&Path>) -> ExtractionRecord {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raw = match chain.extract_text(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(file = %file, error = %err, "conversion failed");
            return ExtractionRecord::failed(file, format!("conversion failed: {err}"));
        }
    };

    let doc = Document::new(file, raw);
    if let Some(dir) = text_dir {
        save_normalized_text(dir, &doc);
    }
    readmine_extract::process_document(&doc)
}

fn save_normalized_text(dir: &Path, doc: &Document) {
    let stem = Path::new(&doc.id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.id.clone());
    let path = dir.join(format!("{stem}.txt"));
    if let Err(err) = std::fs::write(&path, &doc.text) {
        tracing::warn!(file = %doc.id, error = %err, "failed to save normalized text");
    }
}

fn inspect(file: &Path, no_color: bool) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("file not found: {}", file.display());
    }
    let file_cfg = config_file::load_config();
    let mut chain = ConversionChain::standard();
    if let Some(min_text_len) = file_cfg.concurrency.and_then(|c| c.min_text_len) {
        chain = chain.with_min_text_len(min_text_len);
    }

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let raw = chain
        .extract_text(file)
        .map_err(|err| anyhow::anyhow!("could not convert {}: {err}", file.display()))?;

    let doc = Document::new(name, raw);
    let record = readmine_extract::process_document(&doc);

    let mut stdout = std::io::stdout();
    output::print_record(&mut stdout, &record, ColorMode(!no_color))?;
    Ok(())
}
