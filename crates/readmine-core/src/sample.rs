//! Deterministic subset selection for batch runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::SampleMode;

/// Select the subset of `files` to process.
///
/// A cap of 0, or one at least as large as the list, keeps everything.
/// `First` takes a prefix of the discovery order; `Random` draws without
/// replacement from a generator seeded with `seed`, returning files in pick
/// order, so the same seed always selects the same subset.
pub fn select_sample(
    files: Vec<PathBuf>,
    max_samples: usize,
    mode: SampleMode,
    seed: u64,
) -> Vec<PathBuf> {
    if max_samples == 0 || max_samples >= files.len() {
        return files;
    }
    match mode {
        SampleMode::First => files.into_iter().take(max_samples).collect(),
        SampleMode::Random => {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut pool = files;
            let mut picked = Vec::with_capacity(max_samples);
            for _ in 0..max_samples {
                let i = rng.usize(..pool.len());
                picked.push(pool.swap_remove(i));
            }
            picked
        }
    }
}

/// Write the sampling audit manifest: one selected path per line, in
/// processing order.
pub fn write_manifest(files: &[PathBuf], path: &Path) -> std::io::Result<()> {
    let mut out = std::fs::File::create(path)?;
    for file in files {
        writeln!(out, "{}", file.display())?;
    }
    Ok(())
}
