//! Inspect command - metrics and smells for one file

use anyhow::{Context, Result};
use cksmell::config::ScanConfig;
use cksmell::extract::extract;
use cksmell::models::{MetricRecord, PredictedSmell, Severity, SmellFinding};
use cksmell::reporters::json::metric_value;
use cksmell::rules::RuleEngine;
use cksmell::traversal::read_unit;
use console::style;
use std::path::Path;

/// Run the inspect command
pub fn run(path: &Path, config: &ScanConfig, as_json: bool) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }

    let source =
        read_unit(path, &config.scan).with_context(|| format!("Failed to read {}", path.display()))?;
    let record = extract(&source, path);
    let findings = RuleEngine::from_config(config).classify(&record);
    let predicted = PredictedSmell::from_findings(&findings);

    if as_json {
        println!("{}", render_json(&record, &findings, predicted)?);
    } else {
        print!("{}", render_text(&record, &findings, predicted));
    }
    Ok(())
}

fn render_json(
    record: &MetricRecord,
    findings: &[SmellFinding],
    predicted: PredictedSmell,
) -> Result<String> {
    let doc = serde_json::json!({
        "record": metric_value(record, false)?,
        "findings": findings,
        "predicted_smell": predicted,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn render_text(record: &MetricRecord, findings: &[SmellFinding], predicted: PredictedSmell) -> String {
    let mut out = String::new();
    let qualified = if record.package.is_empty() {
        record.class_name.clone()
    } else {
        format!("{}.{}", record.package, record.class_name)
    };
    out.push_str(&format!(
        "\n{} {}\n",
        style(qualified).bold(),
        style(&record.file_path).dim()
    ));

    let metrics = [
        ("LOC", record.loc),
        ("WMC", record.wmc),
        ("METHODS", record.methods),
        ("FIELDS", record.fields),
        ("PRIVATE_METHODS", record.private_methods),
        ("CBO", record.cbo),
        ("DIT", record.dit),
        ("LCOM", record.lcom),
        ("TCC", record.tcc),
        ("ATFD", record.atfd),
        ("MAX_METHOD_LOC", record.max_method_loc),
        ("NOC", record.noc),
    ];
    for (name, value) in metrics {
        out.push_str(&format!("  {:<16} {}\n", name, value));
    }

    out.push('\n');
    if findings.is_empty() {
        out.push_str(&format!("{}No smells found\n", style("✓ ").green()));
    }
    for finding in findings {
        let tag = match finding.severity {
            Severity::Major => style("[MAJOR]").red(),
            Severity::Minor => style("[MINOR]").yellow(),
        };
        out.push_str(&format!(
            "{} {} {}\n",
            tag,
            style(&finding.rule_id).dim(),
            finding.message
        ));
    }
    out.push_str(&format!("Predicted: {}\n", style(predicted).cyan()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const UNIT: &str = "package demo;\npublic class Tiny {\n    public int one() {\n        return 1;\n    }\n}\n";

    #[test]
    fn test_render_json_omits_raw_source() {
        let record = extract(UNIT, Path::new("Tiny.java"));
        let findings = RuleEngine::new().classify(&record);
        let out = render_json(&record, &findings, PredictedSmell::from_findings(&findings)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["record"]["class_name"], "Tiny");
        assert!(parsed["record"].get("raw_source").is_none());
        assert_eq!(parsed["predicted_smell"], "Clean");
        assert_eq!(parsed["findings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_render_text_lists_metrics() {
        console::set_colors_enabled(false);
        let record = extract(UNIT, Path::new("Tiny.java"));
        let out = render_text(&record, &[], PredictedSmell::Clean);
        assert!(out.contains("demo.Tiny"));
        assert!(out.contains("METHODS"));
        assert!(out.contains("No smells found"));
        assert!(out.contains("Predicted: Clean"));
    }
}
