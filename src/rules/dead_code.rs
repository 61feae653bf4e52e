//! Dead code rule (S1604)
//!
//! Many private methods relative to the total suggests unused helpers:
//! `PRIVATE_METHODS >= 3 AND METHODS > 0 AND PRIVATE_METHODS > METHODS * 0.5`

use crate::models::{MetricRecord, Severity, SmellLabel};
use crate::rules::base::{Rule, RuleConfig};

pub struct DeadCodeRule {
    /// Minimum private methods (inclusive)
    min_private: usize,
    /// Private share above which helpers are likely unused
    private_ratio: f64,
    severity: Severity,
}

impl DeadCodeRule {
    pub fn new() -> Self {
        Self {
            min_private: 3,
            private_ratio: 0.5,
            severity: Severity::Minor,
        }
    }

    pub fn with_config(config: &RuleConfig) -> Self {
        let defaults = Self::new();
        Self {
            min_private: config.get_option_or("min_private", defaults.min_private),
            private_ratio: config.get_option_or("private_ratio", defaults.private_ratio),
            severity: config.severity.unwrap_or(defaults.severity),
        }
    }
}

impl Default for DeadCodeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DeadCodeRule {
    fn id(&self) -> &'static str {
        "S1604"
    }

    fn name(&self) -> &'static str {
        "dead-code"
    }

    fn label(&self) -> SmellLabel {
        SmellLabel::DeadCode
    }

    fn description(&self) -> &'static str {
        "Detects classes dominated by private methods"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, record: &MetricRecord) -> Option<String> {
        let fires = record.private_methods >= self.min_private
            && record.methods > 0
            && record.private_methods as f64 > record.methods as f64 * self.private_ratio;

        fires.then(|| {
            format!(
                "DeadCode: '{}' has {} private methods out of {} total",
                record.class_name, record.private_methods, record.methods
            )
        })
    }
}
