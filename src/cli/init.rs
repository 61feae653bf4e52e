//! Init command - write a cksmell.toml with the default settings

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# cksmell configuration
# Every value below is the built-in default.

[scan]
# Extension of compilation units (without the dot)
extension = "java"
# Larger files are skipped and counted
max_file_bytes = 4194304
# Fail on invalid UTF-8 instead of replacing it
strict_utf8 = false
# Honor .gitignore / .ignore files while walking
respect_gitignore = false
# Skip hidden files and directories
skip_hidden = false
# Worker threads (default: available parallelism)
# workers = 8

[exclude]
# Patterns relative to each project root
paths = []

[output]
# Include raw_source in ck_metrics/all_ck_metrics.json
raw_source = true
# Prefix of issue rule keys ("java:S2095")
issue_repository = "java"

# Rules accept `enabled`, `severity` ("minor" or "major") and `thresholds`.
# Sections may be named god-class, GodClass, god_class, or by rule id (S2095).

[rules.god-class]
thresholds = { max_wmc = 15, max_loc = 100, max_fields = 12, max_atfd = 4 }

[rules.long-method]
thresholds = { max_lines = 40 }

[rules.data-class]
thresholds = { min_fields = 5, methods_per_field = 2, extra_methods = 2, max_method_loc = 3 }

[rules.dead-code]
thresholds = { min_private = 3, private_ratio = 0.5 }

[rules.feature-envy]
thresholds = { min_atfd = 4, min_receivers = 1, atfd_ratio = 0.6 }
"#;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config_path = root.join("cksmell.toml");
    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cksmell::config::{load_scan_config, DEFAULT_MAX_FILE_BYTES};
    use cksmell::rules::RuleEngine;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();

        let config = load_scan_config(dir.path());
        assert_eq!(config.scan.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        assert_eq!(config.rules.len(), 5);
        assert_eq!(RuleEngine::from_config(&config).rules().count(), 5);
    }

    #[test]
    fn test_existing_config_is_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cksmell.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        run(dir.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        run(dir.path(), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[rules.god-class]"));
    }
}
