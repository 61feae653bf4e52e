//! Project traversal
//!
//! Discovers projects and their compilation units, runs every unit through
//! extraction and classification on a worker pool, and groups the results
//! per project. Unreadable and oversized files are skipped and counted.

pub mod discover;
pub mod pipeline;
pub mod read;

pub use discover::{collect_source_files, discover_projects, Project};
pub use pipeline::{
    scan_unit, scan_units_parallel, PipelineStats, ScannedUnit, SkippedUnit, UnitJob, UnitOutcome,
};
pub use read::{decode_unit, read_unit};

use crate::config::ScanConfig;
use crate::error::ScanResult;
use crate::models::{MetricRecord, SmellFinding};
use crate::rules::RuleEngine;
use std::path::{Path, PathBuf};
use tracing::info;

/// Channel capacity between pipeline stages
const PIPELINE_BUFFER: usize = 256;

/// Traversal options that come from the command line rather than config
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Treat the root itself as one project
    pub single_project: bool,
    /// Worker override (takes precedence over `[scan] workers`)
    pub workers: Option<usize>,
    /// Directories that are never projects
    pub ignore_dirs: Vec<PathBuf>,
}

/// Scan results for one project
#[derive(Debug)]
pub struct ProjectScan {
    pub project: Project,
    /// Sorted by `file_path`
    pub units: Vec<ScannedUnit>,
    pub skipped: Vec<SkippedUnit>,
}

impl ProjectScan {
    pub fn records(&self) -> impl Iterator<Item = &MetricRecord> {
        self.units.iter().map(|u| &u.record)
    }

    pub fn findings(&self) -> impl Iterator<Item = &SmellFinding> {
        self.units.iter().flat_map(|u| u.findings.iter())
    }
}

/// Scan results for every project under a root
#[derive(Debug)]
pub struct Corpus {
    pub root: PathBuf,
    /// Sorted by project name
    pub projects: Vec<ProjectScan>,
    pub stats: PipelineStats,
}

impl Corpus {
    /// All scanned units across projects, sorted by `file_path`
    pub fn units(&self) -> Vec<&ScannedUnit> {
        let mut units: Vec<&ScannedUnit> = self.projects.iter().flat_map(|p| &p.units).collect();
        units.sort_by(|a, b| a.record.file_path.cmp(&b.record.file_path));
        units
    }

    pub fn findings(&self) -> impl Iterator<Item = &SmellFinding> {
        self.projects.iter().flat_map(|p| p.findings())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedUnit> {
        self.projects.iter().flat_map(|p| &p.skipped)
    }

    pub fn skipped_count(&self) -> usize {
        self.projects.iter().map(|p| p.skipped.len()).sum()
    }

    pub fn unit_count(&self) -> usize {
        self.projects.iter().map(|p| p.units.len()).sum()
    }
}

/// Scan every project under `root`.
///
/// Fails only when the root is missing; per-file failures end up in
/// [`ProjectScan::skipped`].
pub fn scan_corpus(
    root: &Path,
    config: &ScanConfig,
    options: &ScanOptions,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ScanResult<Corpus> {
    let projects = discover_projects(root, options.single_project, config, &options.ignore_dirs)?;
    let engine = RuleEngine::from_config(config);

    let jobs: Vec<UnitJob> = projects
        .iter()
        .flat_map(|project| {
            collect_source_files(project, config)
                .into_iter()
                .map(move |path| UnitJob {
                    project: project.name.clone(),
                    project_root: project.root.clone(),
                    path,
                })
        })
        .collect();

    info!(
        "Scanning {} files in {} projects under {}",
        jobs.len(),
        projects.len(),
        root.display()
    );

    let workers = config.worker_count(options.workers);
    let (units, skipped, stats) = scan_units_parallel(
        jobs,
        &config.scan,
        &engine,
        workers,
        PIPELINE_BUFFER,
        progress,
    );

    let mut scans: Vec<ProjectScan> = projects
        .into_iter()
        .map(|project| ProjectScan {
            project,
            units: Vec::new(),
            skipped: Vec::new(),
        })
        .collect();

    // Units arrive sorted by file_path, so each project stays sorted
    for unit in units {
        let owner = unit.record.project.as_deref();
        if let Some(scan) = scans.iter_mut().find(|s| Some(s.project.name.as_str()) == owner) {
            scan.units.push(unit);
        }
    }
    for skip in skipped {
        if let Some(scan) = scans.iter_mut().find(|s| s.project.name == skip.project) {
            scan.skipped.push(skip);
        }
    }

    for scan in &scans {
        info!(
            "Project {}: {} units, {} findings, {} skipped",
            scan.project.name,
            scan.units.len(),
            scan.findings().count(),
            scan.skipped.len()
        );
    }

    Ok(Corpus {
        root: root.to_path_buf(),
        projects: scans,
        stats,
    })
}
