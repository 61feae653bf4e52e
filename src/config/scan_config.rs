//! Scan configuration support
//!
//! Loads configuration from `cksmell.toml` or `.cksmellrc.json` in the
//! projects root, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # cksmell.toml
//!
//! [scan]
//! extension = "java"
//! max_file_bytes = 4194304
//! strict_utf8 = false
//! respect_gitignore = false
//! skip_hidden = false
//! workers = 8
//!
//! [exclude]
//! paths = ["**/generated/**", "*Test.java"]
//!
//! [output]
//! raw_source = true
//! issue_repository = "java"
//!
//! [rules.god-class]
//! thresholds = { max_wmc = 20, max_loc = 150 }
//!
//! [rules.dead-code]
//! enabled = false
//!
//! [rules.S1067]
//! severity = "minor"
//! ```

use crate::models::Severity;
use crate::rules::RuleConfig;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

/// Default per-file size cap (4 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 4 * 1024 * 1024;

/// Configuration file names searched in the projects root, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["cksmell.toml", ".cksmellrc.json"];

/// Complete scan configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScanConfig {
    /// File discovery and decoding
    #[serde(default)]
    pub scan: ScanSettings,

    /// Path exclusion patterns
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Output shaping
    #[serde(default)]
    pub output: OutputSettings,

    /// Per-rule configuration overrides
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOverride>,
}

/// `[scan]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// Extension of compilation units, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Files larger than this are skipped as oversized
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Reject invalid UTF-8 instead of replacing it
    #[serde(default)]
    pub strict_utf8: bool,

    /// Honor `.gitignore` files while walking
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Skip hidden files and directories
    #[serde(default)]
    pub skip_hidden: bool,

    /// Worker threads (default: available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_extension() -> String {
    "java".to_string()
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            strict_utf8: false,
            respect_gitignore: false,
            skip_hidden: false,
            workers: None,
        }
    }
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Patterns matched against paths relative to each project
    #[serde(default)]
    pub paths: Vec<String>,
}

/// `[output]` section
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Include `raw_source` in the combined JSON metrics
    #[serde(default = "default_true")]
    pub raw_source: bool,

    /// Repository prefix for issue rule keys (`java:S2095`)
    #[serde(default = "default_issue_repository")]
    pub issue_repository: String,
}

fn default_true() -> bool {
    true
}

fn default_issue_repository() -> String {
    "java".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            raw_source: true,
            issue_repository: default_issue_repository(),
        }
    }
}

/// Configuration override for a specific rule
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuleOverride {
    /// Whether the rule is evaluated (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Override the default severity (minor, major)
    #[serde(default)]
    pub severity: Option<String>,

    /// Rule-specific threshold overrides (keys depend on the rule)
    #[serde(default)]
    pub thresholds: HashMap<String, ThresholdValue>,
}

/// A threshold value can be an integer, float, boolean or string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThresholdValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl ThresholdValue {
    /// Convert into the JSON value stored in a `RuleConfig`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ThresholdValue::Integer(v) => serde_json::Value::from(*v),
            ThresholdValue::Float(v) => serde_json::Value::from(*v),
            ThresholdValue::Boolean(v) => serde_json::Value::from(*v),
            ThresholdValue::String(v) => serde_json::Value::from(v.as_str()),
        }
    }
}

/// Load configuration from the projects root.
///
/// Searches for `cksmell.toml`, then `.cksmellrc.json`. A file that fails
/// to load is reported and skipped. Returns defaults when nothing is found.
pub fn load_scan_config(root: &Path) -> ScanConfig {
    for name in CONFIG_FILE_NAMES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded scan config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No scan config found, using defaults");
    ScanConfig::default()
}

/// Load an explicit configuration file; JSON when the extension is `.json`,
/// TOML otherwise
pub fn load_config_file(path: &Path) -> anyhow::Result<ScanConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

impl ScanConfig {
    /// Find the override for a rule by config name or rule id.
    ///
    /// `god-class`, `god_class`, `GodClass` and `S2095` all address the same rule.
    /// A section keyed by the rule id wins over one keyed by name.
    pub fn rule_override(&self, name: &str, id: &str) -> Option<&RuleOverride> {
        let wanted = normalize_rule_name(name);
        self.rules
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(id))
            .or_else(|| {
                self.rules
                    .iter()
                    .find(|(key, _)| normalize_rule_name(key) == wanted)
            })
            .map(|(_, value)| value)
    }

    /// Check if a rule is enabled (defaults to true if not specified)
    pub fn is_rule_enabled(&self, name: &str, id: &str) -> bool {
        self.rule_override(name, id)
            .and_then(|o| o.enabled)
            .unwrap_or(true)
    }

    /// Build the `RuleConfig` handed to a rule constructor
    pub fn rule_config(&self, name: &str, id: &str) -> RuleConfig {
        let mut config = RuleConfig::new();
        let Some(rule) = self.rule_override(name, id) else {
            return config;
        };

        if let Some(raw) = rule.severity.as_deref() {
            match raw.parse::<Severity>() {
                Ok(severity) => config = config.with_severity(severity),
                Err(e) => warn!("Ignoring severity override for {}: {}", name, e),
            }
        }
        for (key, value) in &rule.thresholds {
            config = config.with_option(key.clone(), value.to_json());
        }
        config
    }

    /// Check if a project-relative path should be excluded
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.exclude
            .paths
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }

    /// Effective worker count: CLI flag, then config, then available parallelism
    pub fn worker_count(&self, cli_workers: Option<usize>) -> usize {
        cli_workers
            .or(self.scan.workers)
            .filter(|&n| n > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            })
    }
}

/// Normalize a rule name for config lookup
/// Converts various formats to kebab-case for matching
pub fn normalize_rule_name(name: &str) -> String {
    // GodClassRule -> god-class
    // god_class -> god-class
    // god-class -> god-class

    let mut result = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches("-rule").to_string()
}

/// Simple glob pattern matching
pub(crate) fn glob_match(pattern: &str, path: &str) -> bool {
    // **/X/** matches when X is any directory on the path
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let middle = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return path.contains(&format!("/{}/", middle)) || path.starts_with(&format!("{}/", middle));
    }

    if pattern.contains("**") {
        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');
            if !prefix.is_empty() && !path.starts_with(prefix) {
                return false;
            }
            return suffix.is_empty() || path.ends_with(suffix);
        }
    }

    // Single * matches within the file name
    if pattern.contains('*') {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 2 {
            let file_name = path.rsplit('/').next().unwrap_or(path);
            let (prefix, suffix) = (parts[0], parts[1]);
            if prefix.contains('/') {
                return path.starts_with(prefix) && path.ends_with(suffix);
            }
            return file_name.starts_with(prefix) && file_name.ends_with(suffix);
        }
    }

    // Exact match or directory prefix
    path == pattern || path.starts_with(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_rule_name() {
        assert_eq!(normalize_rule_name("GodClassRule"), "god-class");
        assert_eq!(normalize_rule_name("GodClass"), "god-class");
        assert_eq!(normalize_rule_name("god_class"), "god-class");
        assert_eq!(normalize_rule_name("feature-envy"), "feature-envy");
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("**/generated/**", "src/generated/Foo.java"));
        assert!(glob_match("*Test.java", "src/main/FooTest.java"));
        assert!(!glob_match("*Test.java", "src/main/Foo.java"));
        assert!(glob_match("vendor/", "vendor/lib/Foo.java"));
        assert!(!glob_match("vendor/", "src/vendor/Foo.java"));
        assert!(glob_match("src/**", "src/a/b/C.java"));
    }

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.scan.extension, "java");
        assert_eq!(config.scan.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        assert!(!config.scan.strict_utf8);
        assert!(config.output.raw_source);
        assert_eq!(config.output.issue_repository, "java");
        assert!(config.is_rule_enabled("god-class", "S2095"));
        assert_eq!(config.worker_count(Some(3)), 3);
        assert!(config.worker_count(None) >= 1);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_str = r#"
[scan]
strict_utf8 = true
workers = 2

[output]
raw_source = false

[rules.GodClass]
thresholds = { max_wmc = 30, atfd_ratio = 0.75 }
severity = "minor"

[rules.dead_code]
enabled = false

[rules.S1067]
thresholds = { max_lines = 60 }
"#;
        let config: ScanConfig = toml::from_str(toml_str).unwrap();
        assert!(config.scan.strict_utf8);
        assert_eq!(config.scan.extension, "java");
        assert_eq!(config.worker_count(None), 2);
        assert!(!config.output.raw_source);

        assert!(!config.is_rule_enabled("dead-code", "S1604"));
        assert!(config.is_rule_enabled("long-method", "S1067"));

        let god = config.rule_config("god-class", "S2095");
        assert_eq!(god.severity, Some(Severity::Minor));
        assert_eq!(god.get_option::<usize>("max_wmc"), Some(30));

        let long = config.rule_config("long-method", "S1067");
        assert_eq!(long.get_option::<usize>("max_lines"), Some(60));
    }

    #[test]
    fn test_rule_id_section_wins_over_name() {
        let toml_str = r#"
[rules.god-class]
thresholds = { max_wmc = 20 }

[rules.S2095]
thresholds = { max_wmc = 40 }

[rules.GodClass]
thresholds = { max_wmc = 60 }
"#;
        let config: ScanConfig = toml::from_str(toml_str).unwrap();
        for _ in 0..3 {
            let god = config.rule_config("god-class", "S2095");
            assert_eq!(god.get_option::<usize>("max_wmc"), Some(40));
        }

        // Without an id section the name variants resolve in key order
        let config: ScanConfig =
            toml::from_str("[rules.god-class]\nenabled = false\n\n[rules.GodClass]\nenabled = true\n")
                .unwrap();
        assert!(config.is_rule_enabled("god-class", "S2095"));
    }

    #[test]
    fn test_invalid_severity_is_ignored() {
        let config: ScanConfig = toml::from_str("[rules.god-class]\nseverity = \"critical\"\n").unwrap();
        assert_eq!(config.rule_config("god-class", "S2095").severity, None);
    }

    #[test]
    fn test_should_exclude() {
        let config: ScanConfig =
            toml::from_str("[exclude]\npaths = [\"**/generated/**\", \"*Test.java\"]\n").unwrap();
        assert!(config.should_exclude(&PathBuf::from("src/generated/Stub.java")));
        assert!(config.should_exclude(Path::new("src/FooTest.java")));
        assert!(!config.should_exclude(Path::new("src/Foo.java")));
    }

    #[test]
    fn test_load_scan_config_discovery() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_scan_config(dir.path()).scan.extension, "java");

        std::fs::write(
            dir.path().join(".cksmellrc.json"),
            r#"{"scan": {"extension": "jav"}}"#,
        )
        .unwrap();
        assert_eq!(load_scan_config(dir.path()).scan.extension, "jav");

        // A broken TOML file is skipped in favour of the next candidate
        std::fs::write(dir.path().join("cksmell.toml"), "[scan\n").unwrap();
        assert_eq!(load_scan_config(dir.path()).scan.extension, "jav");
        assert!(load_config_file(&dir.path().join("cksmell.toml")).is_err());
    }
}
