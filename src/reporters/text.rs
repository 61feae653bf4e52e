//! Text (terminal) summary of a scan

use crate::models::{FindingsSummary, PredictedSmell, SmellLabel};
use crate::traversal::Corpus;
use console::style;
use std::collections::BTreeMap;
use std::path::Path;

/// Render the end-of-scan summary
pub fn render_summary(corpus: &Corpus, output_dir: &Path) -> String {
    let mut out = String::new();
    let summary = FindingsSummary::from_findings(corpus.findings());

    out.push_str(&format!("\n{}\n", style("cksmell scan").bold()));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));
    out.push_str(&format!(
        "Projects: {}  Units: {}  Skipped: {}\n",
        style(corpus.projects.len()).cyan(),
        style(corpus.unit_count()).cyan(),
        skipped_style(corpus.skipped_count()),
    ));

    out.push_str(&format!(
        "\n{} ({} total)\n",
        style("FINDINGS").bold(),
        summary.total
    ));
    if summary.total > 0 {
        out.push_str(&format!(
            "  {} | {}\n",
            style(format!("{} major", summary.major)).red(),
            style(format!("{} minor", summary.minor)).yellow()
        ));
        for label in SmellLabel::ALL {
            let count = summary.by_label.get(&label).copied().unwrap_or(0);
            if count > 0 {
                out.push_str(&format!("  {:<12} {}\n", label.as_str(), count));
            }
        }
    }

    out.push_str(&format!("\n{}\n", style("PREDICTED LABELS").bold()));
    for (label, count) in predicted_counts(corpus) {
        out.push_str(&format!("  {:<12} {}\n", label.as_str(), count));
    }

    if corpus.projects.len() > 1 {
        out.push_str(&format!("\n{}\n", style("PROJECTS").bold()));
        for project in &corpus.projects {
            out.push_str(&format!(
                "  {:<24} {:>5} units {:>5} findings {:>3} skipped\n",
                project.project.name,
                project.units.len(),
                project.findings().count(),
                project.skipped.len()
            ));
        }
    }

    out.push_str(&format!(
        "\n{}Output written to {}\n",
        style("✓ ").green(),
        style(output_dir.display()).bold()
    ));
    out
}

/// Count of first-finding labels over all units
pub fn predicted_counts(corpus: &Corpus) -> BTreeMap<PredictedSmell, usize> {
    let mut counts = BTreeMap::new();
    for unit in corpus.units() {
        *counts
            .entry(PredictedSmell::from_findings(&unit.findings))
            .or_insert(0) += 1;
    }
    counts
}

fn skipped_style(count: usize) -> console::StyledObject<usize> {
    if count > 0 {
        style(count).yellow()
    } else {
        style(count).dim()
    }
}
