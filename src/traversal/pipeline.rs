//! Parallel scan pipeline using crossbeam channels
//!
//! Reading, extraction and classification are stateless per file, so they
//! run on N worker threads. Collection is sequential.
//!
//! ```text
//!                     ┌─────────────┐
//!                     │   Producer  │  Feeds unit jobs
//!                     └──────┬──────┘
//!                            │ bounded channel (job_tx → job_rx)
//!            ┌───────────────┼───────────────┐
//!            ▼               ▼               ▼
//!     ┌──────────┐    ┌──────────┐    ┌──────────┐
//!     │ Worker 1 │    │ Worker 2 │    │ Worker N │  read + extract + classify
//!     └────┬─────┘    └────┬─────┘    └────┬─────┘
//!          └───────────────┼───────────────┘
//!                          │ bounded channel (outcome_tx → outcome_rx)
//!                          ▼
//!                   ┌──────────────┐
//!                   │  Collector   │  Gathers outcomes, sorts by file_path
//!                   └──────────────┘
//! ```
//!
//! A failing file produces a `Skipped` outcome; it never stops other workers.

use crate::config::ScanSettings;
use crate::error::ScanError;
use crate::extract::extract;
use crate::models::{MetricRecord, SmellFinding};
use crate::rules::RuleEngine;
use crate::traversal::read::read_unit;
use crossbeam_channel::bounded;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, warn};

/// One file to scan, tagged with the project it belongs to
#[derive(Debug, Clone)]
pub struct UnitJob {
    pub project: String,
    pub project_root: PathBuf,
    pub path: PathBuf,
}

/// A successfully scanned compilation unit
#[derive(Debug, Clone)]
pub struct ScannedUnit {
    pub record: MetricRecord,
    pub findings: Vec<SmellFinding>,
    /// Path relative to the project root, `/`-separated
    pub relative_path: String,
}

/// A file that was skipped, with the reason
#[derive(Debug)]
pub struct SkippedUnit {
    pub project: String,
    pub error: ScanError,
}

/// Outcome of one job
#[derive(Debug)]
pub enum UnitOutcome {
    Scanned(ScannedUnit),
    Skipped(SkippedUnit),
}

/// Stats from a single worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    pub scanned: usize,
    pub skipped: usize,
}

/// Combined stats from the pipeline
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    pub total_files: usize,
    pub scanned_files: usize,
    pub skipped_files: usize,
    pub findings: usize,
    pub workers: usize,
}

/// Scan one unit: read, extract, tag, classify
pub fn scan_unit(job: &UnitJob, settings: &ScanSettings, engine: &RuleEngine) -> UnitOutcome {
    let source = match read_unit(&job.path, settings) {
        Ok(source) => source,
        Err(error) => {
            return UnitOutcome::Skipped(SkippedUnit {
                project: job.project.clone(),
                error,
            })
        }
    };

    let record = extract(&source, &job.path).with_project(job.project.clone());
    let findings = engine.classify(&record);
    debug!(
        "{}: {} ({} findings)",
        job.path.display(),
        record.class_name,
        findings.len()
    );

    UnitOutcome::Scanned(ScannedUnit {
        relative_path: relative_path(&job.path, &job.project_root),
        record,
        findings,
    })
}

/// Run the pipeline over `jobs` and collect every outcome.
///
/// Scanned units come back sorted by `file_path`; skipped units in the
/// order they were reported. `progress` receives `(done, total)`.
pub fn scan_units_parallel(
    jobs: Vec<UnitJob>,
    settings: &ScanSettings,
    engine: &RuleEngine,
    num_workers: usize,
    buffer_size: usize,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> (Vec<ScannedUnit>, Vec<SkippedUnit>, PipelineStats) {
    let total = jobs.len();
    let num_workers = num_workers.max(1).min(total.max(1));
    let buffer_size = buffer_size.max(1);

    let mut stats = PipelineStats {
        total_files: total,
        workers: num_workers,
        ..Default::default()
    };
    let mut scanned = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    thread::scope(|scope| {
        // Channel for jobs (producer → workers)
        let (job_tx, job_rx) = bounded::<UnitJob>(buffer_size);
        // Channel for outcomes (workers → collector)
        let (outcome_tx, outcome_rx) = bounded::<UnitOutcome>(buffer_size);

        scope.spawn(move || {
            for job in jobs {
                // Blocks while workers are busy (backpressure)
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        let mut worker_handles = Vec::with_capacity(num_workers);
        for _ in 0..num_workers {
            let rx = job_rx.clone();
            let tx = outcome_tx.clone();
            worker_handles.push(scope.spawn(move || {
                let mut worker = WorkerStats::default();
                for job in rx {
                    let outcome = scan_unit(&job, settings, engine);
                    match &outcome {
                        UnitOutcome::Scanned(_) => worker.scanned += 1,
                        UnitOutcome::Skipped(s) => {
                            worker.skipped += 1;
                            warn!("{}", s.error);
                        }
                    }
                    if tx.send(outcome).is_err() {
                        break;
                    }
                }
                worker
            }));
        }

        // Workers hold the only remaining ends
        drop(job_rx);
        drop(outcome_tx);

        let mut done = 0;
        for outcome in outcome_rx {
            done += 1;
            if let Some(cb) = progress {
                if done % 50 == 0 || done == total {
                    cb(done, total);
                }
            }
            match outcome {
                UnitOutcome::Scanned(unit) => {
                    stats.findings += unit.findings.len();
                    scanned.push(unit);
                }
                UnitOutcome::Skipped(s) => skipped.push(s),
            }
        }

        for handle in worker_handles {
            if let Ok(worker) = handle.join() {
                stats.scanned_files += worker.scanned;
                stats.skipped_files += worker.skipped;
            }
        }
    });

    scanned.sort_by(|a, b| a.record.file_path.cmp(&b.record.file_path));
    (scanned, skipped, stats)
}

fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
