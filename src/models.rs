//! Core data models for cksmell
//!
//! These models are shared by the extractor, the rule engine and the
//! reporters. Field names of the serialized forms are a contract with the
//! dataset-merge tooling downstream and must not change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Severity of a smell finding (ordinal, `Minor < Major`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Minor,
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Minor => write!(f, "MINOR"),
            Severity::Major => write!(f, "MAJOR"),
        }
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            _ => Err(anyhow::anyhow!(
                "Unknown severity '{}'. Valid severities: minor, major",
                s
            )),
        }
    }
}

/// The fixed set of smells the rule engine can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SmellLabel {
    GodClass,
    LongMethod,
    DataClass,
    DeadCode,
    FeatureEnvy,
}

impl SmellLabel {
    /// All labels, in rule evaluation order
    pub const ALL: [SmellLabel; 5] = [
        SmellLabel::GodClass,
        SmellLabel::LongMethod,
        SmellLabel::DataClass,
        SmellLabel::DeadCode,
        SmellLabel::FeatureEnvy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SmellLabel::GodClass => "GodClass",
            SmellLabel::LongMethod => "LongMethod",
            SmellLabel::DataClass => "DataClass",
            SmellLabel::DeadCode => "DeadCode",
            SmellLabel::FeatureEnvy => "FeatureEnvy",
        }
    }
}

impl fmt::Display for SmellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural metrics for one compilation unit.
///
/// Created once per extraction and never mutated afterwards; the traversal
/// only tags it with its project via [`MetricRecord::with_project`] before
/// handing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MetricRecord {
    pub file_path: String,
    pub class_name: String,
    pub package: String,
    #[serde(rename = "LOC")]
    pub loc: usize,
    #[serde(rename = "WMC")]
    pub wmc: usize,
    #[serde(rename = "METHODS")]
    pub methods: usize,
    #[serde(rename = "FIELDS")]
    pub fields: usize,
    #[serde(rename = "PRIVATE_METHODS")]
    pub private_methods: usize,
    #[serde(rename = "CBO")]
    pub cbo: usize,
    #[serde(rename = "DIT")]
    pub dit: usize,
    #[serde(rename = "LCOM")]
    pub lcom: usize,
    #[serde(rename = "TCC")]
    pub tcc: usize,
    #[serde(rename = "ATFD")]
    pub atfd: usize,
    #[serde(rename = "MAX_METHOD_LOC")]
    pub max_method_loc: usize,
    /// Always 1: one class per compilation unit
    #[serde(rename = "NOC")]
    pub noc: usize,
    /// Project the unit was discovered under (set by the traversal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub raw_source: String,
}

impl MetricRecord {
    /// Tag the record with the project it belongs to
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

/// One rule-triggered classification tied to a metric record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmellFinding {
    pub rule_id: String,
    pub smell_label: SmellLabel,
    pub severity: Severity,
    pub message: String,
    pub class_name: String,
    pub file_path: String,
}

/// Single-label reduction of a finding list.
///
/// Takes the first finding in evaluation order, `Clean` when there is none.
/// This is lossy and exists only for tooling that expects one label per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PredictedSmell {
    Smell(SmellLabel),
    Clean,
}

impl PredictedSmell {
    pub fn from_findings(findings: &[SmellFinding]) -> Self {
        findings
            .first()
            .map(|f| PredictedSmell::Smell(f.smell_label))
            .unwrap_or(PredictedSmell::Clean)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictedSmell::Smell(label) => label.as_str(),
            PredictedSmell::Clean => "Clean",
        }
    }
}

impl fmt::Display for PredictedSmell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PredictedSmell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Serialized issue, shaped like a code-quality server's issue search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub rule: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub severity: Severity,
    pub text: String,
    pub smell_label: SmellLabel,
    pub component: String,
    pub class_name: String,
    pub file_path: String,
}

/// Issue document written per project and for the combined corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReport {
    pub total: usize,
    pub issues: Vec<Issue>,
}

impl IssueReport {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            total: issues.len(),
            issues,
        }
    }
}

/// Summary of findings by severity and label
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingsSummary {
    pub major: usize,
    pub minor: usize,
    pub total: usize,
    pub by_label: BTreeMap<SmellLabel, usize>,
}

impl FindingsSummary {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a SmellFinding>) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Major => summary.major += 1,
                Severity::Minor => summary.minor += 1,
            }
            *summary.by_label.entry(f.smell_label).or_insert(0) += 1;
            summary.total += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(label: SmellLabel, severity: Severity) -> SmellFinding {
        SmellFinding {
            rule_id: "S0000".into(),
            smell_label: label,
            severity,
            message: String::new(),
            class_name: "Foo".into(),
            file_path: "Foo.java".into(),
        }
    }

    #[test]
    fn test_severity_ordering_and_parsing() {
        assert!(Severity::Major > Severity::Minor);
        assert_eq!("MAJOR".parse::<Severity>().unwrap(), Severity::Major);
        assert_eq!("minor".parse::<Severity>().unwrap(), Severity::Minor);
        assert!("critical".parse::<Severity>().is_err());
        assert_eq!(serde_json::to_string(&Severity::Major).unwrap(), "\"MAJOR\"");
    }

    #[test]
    fn test_metric_record_field_names() {
        let record = MetricRecord {
            file_path: "a/Foo.java".into(),
            class_name: "Foo".into(),
            noc: 1,
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        for key in [
            "file_path",
            "class_name",
            "package",
            "LOC",
            "WMC",
            "METHODS",
            "FIELDS",
            "PRIVATE_METHODS",
            "CBO",
            "DIT",
            "LCOM",
            "TCC",
            "ATFD",
            "MAX_METHOD_LOC",
            "NOC",
            "raw_source",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert!(value.get("project").is_none());

        let tagged = serde_json::to_value(record.with_project("demo")).unwrap();
        assert_eq!(tagged["project"], "demo");
    }

    #[test]
    fn test_predicted_smell_takes_first_finding() {
        assert_eq!(PredictedSmell::from_findings(&[]), PredictedSmell::Clean);
        assert_eq!(PredictedSmell::Clean.to_string(), "Clean");

        let findings = vec![
            finding(SmellLabel::GodClass, Severity::Major),
            finding(SmellLabel::FeatureEnvy, Severity::Major),
        ];
        assert_eq!(
            PredictedSmell::from_findings(&findings),
            PredictedSmell::Smell(SmellLabel::GodClass)
        );
    }

    #[test]
    fn test_issue_type_field_is_renamed() {
        let issue = Issue {
            key: "p:Foo.java:java:S1067".into(),
            rule: "java:S1067".into(),
            issue_type: "CODE_SMELL".into(),
            severity: Severity::Major,
            text: "LongMethod: longest method in 'Foo' has 41 lines".into(),
            smell_label: SmellLabel::LongMethod,
            component: "p:Foo.java".into(),
            class_name: "Foo".into(),
            file_path: "p/Foo.java".into(),
        };
        let value = serde_json::to_value(IssueReport::new(vec![issue])).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["issues"][0]["type"], "CODE_SMELL");
        assert_eq!(value["issues"][0]["smell_label"], "LongMethod");
    }

    #[test]
    fn test_findings_summary_counts() {
        let findings = vec![
            finding(SmellLabel::GodClass, Severity::Major),
            finding(SmellLabel::DataClass, Severity::Minor),
            finding(SmellLabel::GodClass, Severity::Major),
        ];
        let summary = FindingsSummary::from_findings(&findings);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.major, 2);
        assert_eq!(summary.minor, 1);
        assert_eq!(summary.by_label[&SmellLabel::GodClass], 2);
    }
}
