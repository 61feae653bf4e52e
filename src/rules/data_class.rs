//! Data class rule (S2093)
//!
//! Classes that are mostly state with trivial accessors:
//! `FIELDS >= 5 AND METHODS > 0 AND WMC <= FIELDS*2 + 2 AND MAX_METHOD_LOC <= 3`

use crate::models::{MetricRecord, Severity, SmellLabel};
use crate::rules::base::{Rule, RuleConfig};

/// Thresholds for data class detection
#[derive(Debug, Clone, PartialEq)]
pub struct DataClassThresholds {
    /// Minimum private fields (inclusive)
    pub min_fields: usize,
    /// Methods allowed per field (one getter, one setter)
    pub methods_per_field: usize,
    /// Extra methods allowed on top of the accessors
    pub extra_methods: usize,
    /// Longest method body still considered trivial (inclusive)
    pub max_method_loc: usize,
}

impl Default for DataClassThresholds {
    fn default() -> Self {
        Self {
            min_fields: 5,
            methods_per_field: 2,
            extra_methods: 2,
            max_method_loc: 3,
        }
    }
}

pub struct DataClassRule {
    thresholds: DataClassThresholds,
    severity: Severity,
}

impl DataClassRule {
    pub fn new() -> Self {
        Self {
            thresholds: DataClassThresholds::default(),
            severity: Severity::Minor,
        }
    }

    pub fn with_config(config: &RuleConfig) -> Self {
        let d = DataClassThresholds::default();
        Self {
            thresholds: DataClassThresholds {
                min_fields: config.get_option_or("min_fields", d.min_fields),
                methods_per_field: config.get_option_or("methods_per_field", d.methods_per_field),
                extra_methods: config.get_option_or("extra_methods", d.extra_methods),
                max_method_loc: config.get_option_or("max_method_loc", d.max_method_loc),
            },
            severity: config.severity.unwrap_or(Severity::Minor),
        }
    }
}

impl Default for DataClassRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DataClassRule {
    fn id(&self) -> &'static str {
        "S2093"
    }

    fn name(&self) -> &'static str {
        "data-class"
    }

    fn label(&self) -> SmellLabel {
        SmellLabel::DataClass
    }

    fn description(&self) -> &'static str {
        "Detects field-heavy classes whose methods are all trivial"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, record: &MetricRecord) -> Option<String> {
        let t = &self.thresholds;
        let accessor_budget = record
            .fields
            .saturating_mul(t.methods_per_field)
            .saturating_add(t.extra_methods);
        let fires = record.fields >= t.min_fields
            && record.methods > 0
            && record.wmc <= accessor_budget
            && record.max_method_loc <= t.max_method_loc;

        fires.then(|| {
            format!(
                "DataClass: '{}' has {} fields but only trivial methods (WMC={})",
                record.class_name, record.fields, record.wmc
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: usize, methods: usize, max_method_loc: usize) -> MetricRecord {
        MetricRecord {
            class_name: "Dto".into(),
            fields,
            methods,
            wmc: methods,
            max_method_loc,
            noc: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_boundaries() {
        let rule = DataClassRule::new();
        assert!(rule.evaluate(&record(5, 10, 3)).is_some());
        // WMC budget is 5 * 2 + 2 = 12
        assert!(rule.evaluate(&record(5, 12, 1)).is_some());
        assert!(rule.evaluate(&record(5, 13, 1)).is_none());
        assert!(rule.evaluate(&record(4, 8, 1)).is_none());
        assert!(rule.evaluate(&record(5, 0, 0)).is_none());
        assert!(rule.evaluate(&record(5, 10, 4)).is_none());
    }

    #[test]
    fn test_message_and_severity() {
        let rule = DataClassRule::new();
        assert_eq!(rule.severity(), Severity::Minor);
        assert_eq!(
            rule.evaluate(&record(6, 12, 1)).as_deref(),
            Some("DataClass: 'Dto' has 6 fields but only trivial methods (WMC=12)")
        );
    }

    #[test]
    fn test_huge_thresholds_saturate() {
        let config = RuleConfig::new()
            .with_option("methods_per_field", serde_json::json!(usize::MAX))
            .with_option("extra_methods", serde_json::json!(usize::MAX));
        let rule = DataClassRule::with_config(&config);
        assert!(rule.evaluate(&record(usize::MAX, 40, 1)).is_some());
    }
}
