//! Long method rule (S1067)
//!
//! Fires when the longest method body has more than 40 code lines.

use crate::models::{MetricRecord, Severity, SmellLabel};
use crate::rules::base::{Rule, RuleConfig};

pub struct LongMethodRule {
    /// Body code lines above which a method is too long
    max_lines: usize,
    severity: Severity,
}

impl LongMethodRule {
    pub fn new() -> Self {
        Self {
            max_lines: 40,
            severity: Severity::Major,
        }
    }

    /// Create with custom config (reads `max_lines`)
    pub fn with_config(config: &RuleConfig) -> Self {
        let defaults = Self::new();
        Self {
            max_lines: config.get_option_or("max_lines", defaults.max_lines),
            severity: config.severity.unwrap_or(defaults.severity),
        }
    }
}

impl Default for LongMethodRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for LongMethodRule {
    fn id(&self) -> &'static str {
        "S1067"
    }

    fn name(&self) -> &'static str {
        "long-method"
    }

    fn label(&self) -> SmellLabel {
        SmellLabel::LongMethod
    }

    fn description(&self) -> &'static str {
        "Detects classes whose longest method exceeds 40 code lines"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, record: &MetricRecord) -> Option<String> {
        (record.max_method_loc > self.max_lines).then(|| {
            format!(
                "LongMethod: longest method in '{}' has {} lines",
                record.class_name, record.max_method_loc
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(max_method_loc: usize) -> MetricRecord {
        MetricRecord {
            class_name: "Calc".into(),
            max_method_loc,
            noc: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_boundary() {
        let rule = LongMethodRule::new();
        assert_eq!(
            rule.evaluate(&record(41)).as_deref(),
            Some("LongMethod: longest method in 'Calc' has 41 lines")
        );
        assert!(rule.evaluate(&record(40)).is_none());
    }

    #[test]
    fn test_custom_max_lines() {
        let config = RuleConfig::new().with_option("max_lines", serde_json::json!(10));
        let rule = LongMethodRule::with_config(&config);
        assert!(rule.evaluate(&record(11)).is_some());
        assert!(rule.evaluate(&record(10)).is_none());
    }
}
