//! God class rule (S2095)
//!
//! A "god class" is a class that:
//! - Has many methods (WMC is the raw method count here)
//! - Has many lines of code
//! - Either holds a lot of state or reaches into other objects' data
//!
//! `WMC > 15 AND LOC > 100 AND (FIELDS > 12 OR ATFD > 4)`

use crate::models::{MetricRecord, Severity, SmellLabel};
use crate::rules::base::{Rule, RuleConfig};

/// Thresholds for god class detection (all comparisons are strict)
#[derive(Debug, Clone, PartialEq)]
pub struct GodClassThresholds {
    /// WMC above which a class is suspicious
    pub max_wmc: usize,
    /// LOC above which a class is suspicious
    pub max_loc: usize,
    /// Field count above which a large class holds too much state
    pub max_fields: usize,
    /// ATFD above which a large class uses too much foreign data
    pub max_atfd: usize,
}

impl Default for GodClassThresholds {
    fn default() -> Self {
        Self {
            max_wmc: 15,
            max_loc: 100,
            max_fields: 12,
            max_atfd: 4,
        }
    }
}

/// Detects classes with too many responsibilities
pub struct GodClassRule {
    thresholds: GodClassThresholds,
    severity: Severity,
}

impl GodClassRule {
    /// Create a new rule with default thresholds
    pub fn new() -> Self {
        Self::with_thresholds(GodClassThresholds::default())
    }

    /// Create with custom thresholds
    pub fn with_thresholds(thresholds: GodClassThresholds) -> Self {
        Self {
            thresholds,
            severity: Severity::Major,
        }
    }

    /// Create with custom config
    pub fn with_config(config: &RuleConfig) -> Self {
        let defaults = GodClassThresholds::default();
        let thresholds = GodClassThresholds {
            max_wmc: config.get_option_or("max_wmc", defaults.max_wmc),
            max_loc: config.get_option_or("max_loc", defaults.max_loc),
            max_fields: config.get_option_or("max_fields", defaults.max_fields),
            max_atfd: config.get_option_or("max_atfd", defaults.max_atfd),
        };
        Self {
            thresholds,
            severity: config.severity.unwrap_or(Severity::Major),
        }
    }

    fn is_god_class(&self, record: &MetricRecord) -> bool {
        let t = &self.thresholds;
        record.wmc > t.max_wmc
            && record.loc > t.max_loc
            && (record.fields > t.max_fields || record.atfd > t.max_atfd)
    }
}

impl Default for GodClassRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for GodClassRule {
    fn id(&self) -> &'static str {
        "S2095"
    }

    fn name(&self) -> &'static str {
        "god-class"
    }

    fn label(&self) -> SmellLabel {
        SmellLabel::GodClass
    }

    fn description(&self) -> &'static str {
        "Detects large, method-heavy classes that hold much state or foreign data"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, record: &MetricRecord) -> Option<String> {
        if !self.is_god_class(record) {
            return None;
        }
        Some(format!(
            "GodClass: class '{}' has WMC={}, LOC={}, FIELDS={}",
            record.class_name, record.wmc, record.loc, record.fields
        ))
    }
}
