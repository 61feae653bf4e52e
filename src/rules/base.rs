//! Base rule trait and configuration
//!
//! This module defines the core abstractions for smell classification:
//! - `Rule` trait that all five smell rules implement
//! - `RuleConfig` for per-rule threshold and severity overrides

use crate::models::{MetricRecord, Severity, SmellLabel};
use std::collections::HashMap;

/// Configuration options for a rule
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    /// Severity to report instead of the rule's default
    pub severity: Option<Severity>,
    /// Rule-specific thresholds
    pub options: HashMap<String, serde_json::Value>,
}

impl RuleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reported severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set a threshold option
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Get a typed option value
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get an option with a default value
    pub fn get_option_or<T: serde::de::DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_option(key).unwrap_or(default)
    }
}

/// Trait for all smell rules
///
/// A rule is a pure threshold predicate over one `MetricRecord`. It never
/// looks at source text and never fails.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct TinyClassRule;
///
/// impl Rule for TinyClassRule {
///     fn id(&self) -> &'static str { "X0001" }
///     fn name(&self) -> &'static str { "tiny-class" }
///     fn label(&self) -> SmellLabel { SmellLabel::DataClass }
///     fn description(&self) -> &'static str { "Classes with almost no code" }
///     fn severity(&self) -> Severity { Severity::Minor }
///
///     fn evaluate(&self, record: &MetricRecord) -> Option<String> {
///         (record.loc < 3).then(|| format!("TinyClass: '{}'", record.class_name))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable rule identifier (e.g., "S2095")
    fn id(&self) -> &'static str;

    /// Config key for this rule (e.g., "god-class")
    fn name(&self) -> &'static str;

    /// Smell reported when the rule fires
    fn label(&self) -> SmellLabel;

    /// Human-readable description of the predicate
    fn description(&self) -> &'static str;

    /// Severity of findings from this rule
    fn severity(&self) -> Severity;

    /// Evaluate the predicate.
    ///
    /// Returns the finding message, including the metric values that
    /// triggered it, or `None` when the record is clean for this rule.
    fn evaluate(&self, record: &MetricRecord) -> Option<String>;
}
