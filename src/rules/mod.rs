//! Smell rules
//!
//! Each rule is a threshold predicate over a [`MetricRecord`](crate::models::MetricRecord):
//!
//! | Id    | Rule        | Severity |
//! |-------|-------------|----------|
//! | S2095 | GodClass    | MAJOR    |
//! | S1067 | LongMethod  | MAJOR    |
//! | S2093 | DataClass   | MINOR    |
//! | S1604 | DeadCode    | MINOR    |
//! | R1031 | FeatureEnvy | MAJOR    |
//!
//! The [`RuleEngine`] evaluates all of them in that order.

mod base;
mod data_class;
mod dead_code;
mod engine;
mod feature_envy;
mod god_class;
mod long_method;

pub use base::{Rule, RuleConfig};
pub use data_class::{DataClassRule, DataClassThresholds};
pub use dead_code::DeadCodeRule;
pub use engine::{classify, RuleEngine};
pub use feature_envy::{FeatureEnvyRule, FeatureEnvyThresholds};
pub use god_class::{GodClassRule, GodClassThresholds};
pub use long_method::LongMethodRule;
