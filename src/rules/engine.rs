//! Rule engine: applies every enabled rule to a metric record
//!
//! Rules are evaluated independently in a fixed order (GodClass,
//! LongMethod, DataClass, DeadCode, FeatureEnvy) and all matches are
//! returned. Classification is pure and never fails.

use crate::config::ScanConfig;
use crate::models::{MetricRecord, PredictedSmell, SmellFinding};
use crate::rules::{
    DataClassRule, DeadCodeRule, FeatureEnvyRule, GodClassRule, LongMethodRule, Rule,
};
use tracing::debug;

/// Ordered set of rules
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Engine with all five rules at their calibrated thresholds
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Engine honoring the `[rules.*]` sections of a scan config.
    ///
    /// Disabled rules are dropped; the order of the rest is unchanged.
    pub fn from_config(config: &ScanConfig) -> Self {
        let configured: Vec<Box<dyn Rule>> = vec![
            Box::new(GodClassRule::with_config(
                &config.rule_config("god-class", "S2095"),
            )),
            Box::new(LongMethodRule::with_config(
                &config.rule_config("long-method", "S1067"),
            )),
            Box::new(DataClassRule::with_config(
                &config.rule_config("data-class", "S2093"),
            )),
            Box::new(DeadCodeRule::with_config(
                &config.rule_config("dead-code", "S1604"),
            )),
            Box::new(FeatureEnvyRule::with_config(
                &config.rule_config("feature-envy", "R1031"),
            )),
        ];

        let rules = configured
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name(), rule.id());
                if !enabled {
                    debug!("Rule {} ({}) disabled by config", rule.name(), rule.id());
                }
                enabled
            })
            .collect();

        Self { rules }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Classify one record, returning every finding in rule order
    pub fn classify(&self, record: &MetricRecord) -> Vec<SmellFinding> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.evaluate(record).map(|message| SmellFinding {
                    rule_id: rule.id().to_string(),
                    smell_label: rule.label(),
                    severity: rule.severity(),
                    message,
                    class_name: record.class_name.clone(),
                    file_path: record.file_path.clone(),
                })
            })
            .collect()
    }

    /// Single-label reduction for tools that expect one label per unit
    pub fn predict(&self, record: &MetricRecord) -> PredictedSmell {
        PredictedSmell::from_findings(&self.classify(record))
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(GodClassRule::new()),
        Box::new(LongMethodRule::new()),
        Box::new(DataClassRule::new()),
        Box::new(DeadCodeRule::new()),
        Box::new(FeatureEnvyRule::new()),
    ]
}

/// Classify a record with the default rule set
pub fn classify(record: &MetricRecord) -> Vec<SmellFinding> {
    RuleEngine::new().classify(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::models::{Severity, SmellLabel};
    use std::path::Path;

    fn record(wmc: usize, loc: usize, fields: usize, atfd: usize, tcc: usize) -> MetricRecord {
        MetricRecord {
            file_path: "proj/Hub.java".into(),
            class_name: "Hub".into(),
            wmc,
            methods: wmc,
            loc,
            fields,
            atfd,
            tcc,
            noc: 1,
            ..Default::default()
        }
    }

    fn labels(findings: &[SmellFinding]) -> Vec<SmellLabel> {
        findings.iter().map(|f| f.smell_label).collect()
    }

    #[test]
    fn test_rule_order_matches_labels() {
        let engine = RuleEngine::new();
        let order: Vec<SmellLabel> = engine.rules().map(|r| r.label()).collect();
        assert_eq!(order, SmellLabel::ALL.to_vec());
    }

    #[test]
    fn test_classify_is_repeatable() {
        let engine = RuleEngine::new();
        let r = record(20, 200, 15, 6, 2);
        let first = engine.classify(&r);
        for _ in 0..5 {
            assert_eq!(engine.classify(&r), first);
        }
    }

    #[test]
    fn test_god_class_boundary() {
        assert_eq!(
            labels(&classify(&record(16, 101, 13, 0, 0))),
            vec![SmellLabel::GodClass]
        );
        assert!(classify(&record(15, 101, 13, 0, 0)).is_empty());
    }

    #[test]
    fn test_long_method_boundary() {
        let mut r = record(1, 50, 0, 0, 0);
        r.max_method_loc = 41;
        assert_eq!(labels(&classify(&r)), vec![SmellLabel::LongMethod]);
        r.max_method_loc = 40;
        assert!(classify(&r).is_empty());
    }

    #[test]
    fn test_multiple_findings_in_rule_order() {
        let findings = classify(&record(20, 200, 15, 6, 2));
        assert_eq!(
            labels(&findings),
            vec![SmellLabel::GodClass, SmellLabel::FeatureEnvy]
        );
        assert_eq!(findings[0].rule_id, "S2095");
        assert_eq!(findings[0].severity, Severity::Major);
        assert_eq!(findings[0].file_path, "proj/Hub.java");
        assert_eq!(
            findings[1].message,
            "FeatureEnvy: 'Hub' has ATFD=6, TCC=2, WMC=20"
        );
        assert_eq!(
            RuleEngine::new().predict(&record(20, 200, 15, 6, 2)),
            PredictedSmell::Smell(SmellLabel::GodClass)
        );
    }

    #[test]
    fn test_empty_unit_is_clean() {
        let r = extract("", Path::new("Empty.java"));
        assert_eq!((r.methods, r.fields, r.wmc, r.loc), (0, 0, 0, 0));
        assert!(classify(&r).is_empty());
        assert_eq!(RuleEngine::new().predict(&r), PredictedSmell::Clean);
    }

    #[test]
    fn test_from_config_disables_and_overrides() {
        let config: ScanConfig = toml::from_str(
            r#"
[rules.GodClass]
enabled = false

[rules.S2093]
severity = "major"
"#,
        )
        .unwrap();
        let engine = RuleEngine::from_config(&config);
        let ids: Vec<&str> = engine.rules().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["S1067", "S2093", "S1604", "R1031"]);

        assert_eq!(
            labels(&engine.classify(&record(20, 200, 15, 6, 2))),
            vec![SmellLabel::FeatureEnvy]
        );

        let data = engine
            .rules()
            .find(|r| r.label() == SmellLabel::DataClass)
            .unwrap();
        assert_eq!(data.severity(), Severity::Major);
    }
}
