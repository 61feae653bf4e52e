//! Conversion of findings into issue records

use crate::models::{Issue, IssueReport};
use crate::traversal::ScannedUnit;

const ISSUE_TYPE: &str = "CODE_SMELL";

/// Build the issues for one project's units, in unit then rule order.
///
/// `component` is `<project>:<relative path>`, `rule` is
/// `<repository>:<rule id>` and `key` is `<component>:<rule>`.
pub fn build_issues<'a>(
    project: &str,
    units: impl IntoIterator<Item = &'a ScannedUnit>,
    repository: &str,
) -> Vec<Issue> {
    units
        .into_iter()
        .flat_map(|unit| unit_issues(project, unit, repository))
        .collect()
}

/// Build the issues for units drawn from several projects, keeping the
/// given unit order. Each unit's component uses the project on its record.
pub fn corpus_issues<'a>(
    units: impl IntoIterator<Item = &'a ScannedUnit>,
    repository: &str,
) -> Vec<Issue> {
    units
        .into_iter()
        .flat_map(|unit| {
            let project = unit.record.project.as_deref().unwrap_or_default();
            unit_issues(project, unit, repository)
        })
        .collect()
}

fn unit_issues(project: &str, unit: &ScannedUnit, repository: &str) -> Vec<Issue> {
    let component = format!("{}:{}", project, unit.relative_path);
    unit.findings
        .iter()
        .map(|finding| {
            let rule = format!("{}:{}", repository, finding.rule_id);
            Issue {
                key: format!("{}:{}", component, rule),
                rule,
                issue_type: ISSUE_TYPE.to_string(),
                severity: finding.severity,
                text: finding.message.clone(),
                smell_label: finding.smell_label,
                component: component.clone(),
                class_name: finding.class_name.clone(),
                file_path: finding.file_path.clone(),
            }
        })
        .collect()
}

/// Issue report for one project
pub fn project_report<'a>(
    project: &str,
    units: impl IntoIterator<Item = &'a ScannedUnit>,
    repository: &str,
) -> IssueReport {
    IssueReport::new(build_issues(project, units, repository))
}
