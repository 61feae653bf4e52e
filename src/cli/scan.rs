//! Scan command - metrics and issue reports for a projects root

use anyhow::{Context, Result};
use cksmell::config::ScanConfig;
use cksmell::models::{FindingsSummary, Severity};
use cksmell::reporters::{self, text};
use cksmell::traversal::{scan_corpus, ScanOptions};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line options of the scan command
#[derive(Debug)]
pub struct ScanArgs {
    pub output: PathBuf,
    pub single_project: bool,
    pub workers: Option<usize>,
    pub fail_on: Option<Severity>,
}

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}

/// Run the scan command. Returns the process exit code.
pub fn run(root: &Path, config: &ScanConfig, args: &ScanArgs) -> Result<i32> {
    let options = ScanOptions {
        single_project: args.single_project,
        workers: args.workers,
        ignore_dirs: vec![args.output.clone()],
    };

    let bar = ProgressBar::new(0);
    bar.set_style(create_bar_style());
    bar.set_message("Scanning units...");
    let progress = |done: usize, total: usize| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    };

    let corpus = scan_corpus(root, config, &options, Some(&progress))
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    bar.finish_and_clear();

    let written = reporters::write_corpus(&corpus, &args.output, &config.output)
        .with_context(|| format!("Failed to write output to {}", args.output.display()))?;
    info!(
        "Wrote {} files ({} issues) to {}",
        written.files.len(),
        written.total_issues,
        args.output.display()
    );

    for skipped in corpus.skipped() {
        eprintln!("{} {}", style("skipped").yellow(), skipped.error);
    }
    println!("{}", text::render_summary(&corpus, &args.output));

    if let Some(threshold) = args.fail_on {
        let summary = FindingsSummary::from_findings(corpus.findings());
        if should_fail(threshold, &summary) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            return Ok(1);
        }
    }
    Ok(0)
}

/// Whether any finding is at or above `threshold`
fn should_fail(threshold: Severity, summary: &FindingsSummary) -> bool {
    match threshold {
        Severity::Major => summary.major > 0,
        Severity::Minor => summary.major > 0 || summary.minor > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_fail() {
        let minor_only = FindingsSummary {
            minor: 2,
            total: 2,
            ..Default::default()
        };
        assert!(should_fail(Severity::Minor, &minor_only));
        assert!(!should_fail(Severity::Major, &minor_only));

        let major = FindingsSummary {
            major: 1,
            total: 1,
            ..Default::default()
        };
        assert!(should_fail(Severity::Major, &major));
        assert!(!should_fail(Severity::Minor, &FindingsSummary::default()));
    }
}
