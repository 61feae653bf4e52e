//! Output reporters for scan results
//!
//! Writes the output directory consumed by the dataset tooling:
//!
//! ```text
//! <out>/
//!   ck_metrics/
//!     <project>_ck.csv          per-project metrics (no raw_source)
//!     all_ck_metrics.csv        combined metrics
//!     all_ck_metrics.json       combined metrics (with raw_source)
//!   sonar_issues/
//!     <project>_sonar.json      per-project issue report
//!     all_sonar_issues.json     combined issue report
//! ```
//!
//! Also renders the terminal summary (`text`).

pub mod csv;
pub mod issues;
pub mod json;
pub mod text;

use crate::config::OutputSettings;
use crate::error::ScanError;
use crate::models::IssueReport;
use crate::traversal::Corpus;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const METRICS_DIR: &str = "ck_metrics";
pub const ISSUES_DIR: &str = "sonar_issues";
pub const ALL_METRICS_JSON: &str = "all_ck_metrics.json";
pub const ALL_METRICS_CSV: &str = "all_ck_metrics.csv";
pub const ALL_ISSUES_JSON: &str = "all_sonar_issues.json";

/// Files written by [`write_corpus`]
#[derive(Debug, Default)]
pub struct WrittenOutputs {
    pub files: Vec<PathBuf>,
    pub total_issues: usize,
}

/// Write the full output layout for a scanned corpus
pub fn write_corpus(
    corpus: &Corpus,
    output_dir: &Path,
    settings: &OutputSettings,
) -> Result<WrittenOutputs> {
    let metrics_dir = output_dir.join(METRICS_DIR);
    let issues_dir = output_dir.join(ISSUES_DIR);
    create_dir(&metrics_dir)?;
    create_dir(&issues_dir)?;

    let mut written = WrittenOutputs::default();

    for project in &corpus.projects {
        let name = &project.project.name;

        let csv_path = metrics_dir.join(format!("{}_ck.csv", name));
        let body = csv::render_metrics(project.records())
            .with_context(|| format!("Failed to render metrics CSV for {}", name))?;
        write_file(&csv_path, &body, &mut written)?;

        let report = issues::project_report(name, &project.units, &settings.issue_repository);
        let issues_path = issues_dir.join(format!("{}_sonar.json", name));
        write_file(&issues_path, &json::render_issues(&report)?, &mut written)?;
    }

    let units = corpus.units();
    let records: Vec<_> = units.iter().map(|u| &u.record).collect();

    let all_json = json::render_metrics(records.iter().copied(), settings.raw_source)
        .context("Failed to render combined metrics JSON")?;
    write_file(&metrics_dir.join(ALL_METRICS_JSON), &all_json, &mut written)?;

    let all_csv = csv::render_metrics(records.iter().copied())
        .context("Failed to render combined metrics CSV")?;
    write_file(&metrics_dir.join(ALL_METRICS_CSV), &all_csv, &mut written)?;

    // Combined files share the file_path order
    let combined = IssueReport::new(issues::corpus_issues(
        units.iter().copied(),
        &settings.issue_repository,
    ));
    written.total_issues = combined.total;
    write_file(
        &issues_dir.join(ALL_ISSUES_JSON),
        &json::render_issues(&combined)?,
        &mut written,
    )?;

    Ok(written)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ScanError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_file(path: &Path, contents: &str, written: &mut WrittenOutputs) -> Result<()> {
    fs::write(path, contents).map_err(|source| ScanError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {}", path.display());
    written.files.push(path.to_path_buf());
    Ok(())
}
