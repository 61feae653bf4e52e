//! Feature envy rule (R1031)
//!
//! A class that uses other objects' accessors more than its own methods:
//! `ATFD >= 4 AND TCC >= 1 AND WMC > 0 AND ATFD > WMC * 0.6`

use crate::models::{MetricRecord, Severity, SmellLabel};
use crate::rules::base::{Rule, RuleConfig};

/// Thresholds for feature envy detection
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEnvyThresholds {
    /// Minimum foreign accessor calls (inclusive)
    pub min_atfd: usize,
    /// Minimum distinct external receivers (inclusive)
    pub min_receivers: usize,
    /// ATFD / WMC ratio that must be exceeded
    pub atfd_ratio: f64,
}

impl Default for FeatureEnvyThresholds {
    fn default() -> Self {
        Self {
            min_atfd: 4,
            min_receivers: 1,
            atfd_ratio: 0.6,
        }
    }
}

pub struct FeatureEnvyRule {
    thresholds: FeatureEnvyThresholds,
    severity: Severity,
}

impl FeatureEnvyRule {
    pub fn new() -> Self {
        Self {
            thresholds: FeatureEnvyThresholds::default(),
            severity: Severity::Major,
        }
    }

    pub fn with_config(config: &RuleConfig) -> Self {
        let d = FeatureEnvyThresholds::default();
        Self {
            thresholds: FeatureEnvyThresholds {
                min_atfd: config.get_option_or("min_atfd", d.min_atfd),
                min_receivers: config.get_option_or("min_receivers", d.min_receivers),
                atfd_ratio: config.get_option_or("atfd_ratio", d.atfd_ratio),
            },
            severity: config.severity.unwrap_or(Severity::Major),
        }
    }
}

impl Default for FeatureEnvyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FeatureEnvyRule {
    fn id(&self) -> &'static str {
        "R1031"
    }

    fn name(&self) -> &'static str {
        "feature-envy"
    }

    fn label(&self) -> SmellLabel {
        SmellLabel::FeatureEnvy
    }

    fn description(&self) -> &'static str {
        "Detects classes that mostly work on other objects' data"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn evaluate(&self, record: &MetricRecord) -> Option<String> {
        let t = &self.thresholds;
        let fires = record.atfd >= t.min_atfd
            && record.tcc >= t.min_receivers
            && record.wmc > 0
            && record.atfd as f64 > record.wmc as f64 * t.atfd_ratio;

        fires.then(|| {
            format!(
                "FeatureEnvy: '{}' has ATFD={}, TCC={}, WMC={}",
                record.class_name, record.atfd, record.tcc, record.wmc
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(atfd: usize, tcc: usize, wmc: usize) -> MetricRecord {
        MetricRecord {
            class_name: "Report".into(),
            atfd,
            tcc,
            wmc,
            methods: wmc,
            noc: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_boundaries() {
        let rule = FeatureEnvyRule::new();
        assert!(rule.evaluate(&record(4, 1, 1)).is_some());
        assert!(rule.evaluate(&record(3, 1, 1)).is_none());
        assert!(rule.evaluate(&record(4, 0, 1)).is_none());
        assert!(rule.evaluate(&record(4, 1, 0)).is_none());
        // 6 > 10 * 0.6 is false
        assert!(rule.evaluate(&record(6, 1, 10)).is_none());
        assert!(rule.evaluate(&record(7, 1, 10)).is_some());
    }

    #[test]
    fn test_message() {
        assert_eq!(
            FeatureEnvyRule::new().evaluate(&record(6, 1, 1)).as_deref(),
            Some("FeatureEnvy: 'Report' has ATFD=6, TCC=1, WMC=1")
        );
    }
}
