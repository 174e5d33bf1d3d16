//! Parallel unique counting over a statically divided address range.
//!
//! The range is cut into one contiguous sub-range per worker. Each worker
//! runs [`count_uniques`] on its own sub-range with its own optional log
//! file and hands its tally back as a value; the totals are summed only
//! after every worker has returned.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::batch::count_uniques;
use crate::range::AddressRange;

/// Settings for a parallel run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Number of workers, and of sub-ranges
    pub workers: usize,
    /// Directory for per-worker `uniqueNN.txt` dumps, `None` disables them
    pub log_dir: Option<PathBuf>,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            workers: default_worker_count(),
            log_dir: None,
        }
    }
}

/// Result of one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub index: usize,
    pub range: AddressRange,
    pub uniques: u64,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// Aggregated result of a parallel run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub range: AddressRange,
    pub workers: usize,
    pub uniques: u64,
    pub scanned: u64,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    pub per_worker: Vec<WorkerReport>,
}

impl RunSummary {
    /// Share of scanned addresses that are unique, in percent.
    pub fn unique_percentage(&self) -> f64 {
        if self.scanned == 0 {
            return 0.0;
        }
        100.0 * self.uniques as f64 / self.scanned as f64
    }
}

/// Available parallelism of the machine, at least one.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Name of the dump file written by worker `index`.
pub fn worker_log_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("unique{:02}.txt", index))
}

/// Count uniques over `range` with one worker per sub-range.
///
/// The first worker failure is returned and the tallies of the other
/// workers are dropped.
pub fn run_parallel(range: AddressRange, options: &SchedulerOptions) -> Result<RunSummary> {
    let started_at = Utc::now();
    let stopwatch = Instant::now();

    let batches = range.split(options.workers);
    let workers = batches.len();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("ipcrunch-worker-{}", index))
        .build()
        .context("Failed to build worker pool")?;

    log::info!("Scanning {} with {} workers", range, workers);

    let per_worker: Vec<WorkerReport> = pool.install(|| {
        batches
            .par_iter()
            .with_max_len(1)
            .enumerate()
            .map(|(index, batch)| run_worker(index, *batch, options.log_dir.as_deref()))
            .collect::<Result<Vec<_>>>()
    })?;

    let uniques: u64 = per_worker.iter().map(|report| report.uniques).sum();
    let summary = RunSummary {
        started_at,
        range,
        workers,
        uniques,
        scanned: range.len(),
        elapsed: stopwatch.elapsed(),
        per_worker,
    };

    log::info!(
        "Found {} uniques in {} addresses using {} workers",
        summary.uniques,
        summary.scanned,
        summary.workers
    );
    Ok(summary)
}

fn run_worker(index: usize, range: AddressRange, log_dir: Option<&Path>) -> Result<WorkerReport> {
    log::info!(
        "Starting worker {}: from {:08x} to {:08x}...",
        index,
        range.start,
        range.end
    );
    let stopwatch = Instant::now();

    let (uniques, log_file) = match log_dir {
        Some(dir) => {
            let path = worker_log_path(dir, index);
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let uniques = count_uniques(range, Some(&mut writer))
                .wrap_err_with(|| format!("Worker {} failed on {}", index, range))?;
            writer
                .flush()
                .with_context(|| format!("Failed to flush log file {}", path.display()))?;
            (uniques, Some(path))
        }
        None => {
            let uniques = count_uniques(range, None)
                .wrap_err_with(|| format!("Worker {} failed on {}", index, range))?;
            (uniques, None)
        }
    };

    let elapsed = stopwatch.elapsed();
    log::debug!(
        "Worker {} finished: {} uniques in {} ms",
        index,
        uniques,
        elapsed.as_millis()
    );

    Ok(WorkerReport {
        index,
        range,
        uniques,
        elapsed,
        log_file,
    })
}
