//! Configuration module for cksmell
//!
//! This module handles:
//! - Scan settings (extension, size cap, decoding, walking)
//! - Rule threshold and severity overrides
//! - Output shaping

mod scan_config;

pub use scan_config::{
    load_config_file, load_scan_config, normalize_rule_name, ExcludeConfig, OutputSettings,
    RuleOverride, ScanConfig, ScanSettings, ThresholdValue, CONFIG_FILE_NAMES,
    DEFAULT_MAX_FILE_BYTES,
};
