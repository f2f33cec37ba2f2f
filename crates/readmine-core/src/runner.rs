//! Parallel batch driver.
//!
//! Documents fan out over a fixed pool of workers through an unbounded
//! channel; each document runs the caller-supplied closure on the blocking
//! thread pool. Results come back over per-job oneshot channels and are
//! collected by index, so output order always matches input order no matter
//! which worker finishes first.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{ExtractionRecord, ProgressEvent, RunConfig, RunStats};

/// Per-document processing closure: convert, extract, assemble.
///
/// Runs on a blocking thread. A panic inside the closure is isolated to its
/// document and surfaces as a failed record.
pub type ProcessFn = Arc<dyn Fn(&Path) -> ExtractionRecord + Send + Sync>;

struct DocJob {
    path: PathBuf,
    index: usize,
    total: usize,
    result_tx: oneshot::Sender<ExtractionRecord>,
}

/// Process `files` with `config.num_workers` concurrent workers.
///
/// Returns the records in input order together with the aggregate counters.
/// Cancellation stops submission of further jobs and drains the queue;
/// in-flight documents finish and their records are kept.
pub async fn run_batch(
    files: Vec<PathBuf>,
    process: ProcessFn,
    config: &RunConfig,
    progress: impl Fn(ProgressEvent) + Send + Sync + 'static,
    cancel: CancellationToken,
) -> (Vec<ExtractionRecord>, RunStats) {
    let total = files.len();
    if total == 0 {
        return (Vec::new(), RunStats::default());
    }

    let progress: Arc<dyn Fn(ProgressEvent) + Send + Sync> = Arc::new(progress);
    let (job_tx, job_rx) = async_channel::unbounded::<DocJob>();

    let num_workers = config.num_workers.max(1).min(total);
    tracing::debug!(num_workers, total, "starting batch run");
    let mut workers: Vec<JoinHandle<()>> = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        workers.push(tokio::spawn(worker_loop(
            job_rx.clone(),
            process.clone(),
            progress.clone(),
            cancel.clone(),
        )));
    }
    drop(job_rx);

    let mut receivers = Vec::with_capacity(total);
    for (index, path) in files.into_iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        let (result_tx, result_rx) = oneshot::channel();
        let job = DocJob {
            path,
            index,
            total,
            result_tx,
        };
        if job_tx.send(job).await.is_err() {
            break;
        }
        receivers.push((index, result_rx));
    }
    job_tx.close();

    let mut slots: Vec<Option<ExtractionRecord>> = Vec::new();
    slots.resize_with(total, || None);
    for (index, result_rx) in receivers {
        // a dropped sender means the job was discarded after cancellation
        if let Ok(record) = result_rx.await {
            slots[index] = Some(record);
        }
    }

    for handle in workers {
        let _ = handle.await;
    }

    let records: Vec<ExtractionRecord> = slots.into_iter().flatten().collect();
    let mut stats = RunStats::default();
    for record in &records {
        stats.record(record);
    }
    tracing::info!(
        processed = stats.processed,
        errors = stats.errors,
        needs_review = stats.needs_review,
        "batch run finished"
    );
    (records, stats)
}

async fn worker_loop(
    job_rx: async_channel::Receiver<DocJob>,
    process: ProcessFn,
    progress: Arc<dyn Fn(ProgressEvent) + Send + Sync>,
    cancel: CancellationToken,
) {
    while let Ok(job) = job_rx.recv().await {
        if cancel.is_cancelled() {
            // drop the job; its oneshot sender closes and the result slot stays empty
            continue;
        }
        let DocJob {
            path,
            index,
            total,
            result_tx,
        } = job;
        let file = file_label(&path);

        progress(ProgressEvent::Processing {
            index,
            total,
            file: file.clone(),
        });

        let work = {
            let process = process.clone();
            let path = path.clone();
            tokio::task::spawn_blocking(move || process(&path))
        };
        let record = match work.await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(file = %file, error = %err, "document processing panicked");
                ExtractionRecord::failed(&file, format!("extraction panicked: {err}"))
            }
        };

        progress(ProgressEvent::Completed {
            index,
            total,
            record: Box::new(record.clone()),
        });
        let _ = result_tx.send(record);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
