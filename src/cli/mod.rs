//! CLI command definitions and handlers

mod init;
mod inspect;
mod scan;

use anyhow::{Context, Result};
use cksmell::config::{load_config_file, load_scan_config, ScanConfig};
use cksmell::models::Severity;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// cksmell - class metrics and smell labels for Java corpora
#[derive(Parser, Debug)]
#[command(name = "cksmell")]
#[command(
    version,
    about = "Extract class-level structural metrics from Java sources and label code smells",
    long_about = "cksmell scans a directory of Java projects, extracts CK-style class metrics \
(LOC, WMC, CBO, LCOM, ATFD, ...) with a fast text scanner, and labels five code smells \
(GodClass, LongMethod, DataClass, DeadCode, FeatureEnvy) with threshold rules.\n\n\
Run without a subcommand to scan the given directory into ./out:\n  \
cksmell projects/",
    after_help = "\
Examples:
  cksmell projects/                       Scan every project under projects/
  cksmell projects/ scan -o dataset       Write output to ./dataset
  cksmell my-app scan --single-project    Treat my-app as one project
  cksmell projects/ scan --fail-on major  Exit 1 if any MAJOR smell is found
  cksmell src/Foo.java inspect --json     Metrics and smells for one file
  cksmell projects/ init                  Write a commented cksmell.toml"
)]
pub struct Cli {
    /// Projects root, or a single file for `inspect` (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64, default: available parallelism)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Configuration file (default: cksmell.toml or .cksmellrc.json in the root)
    #[arg(long, global = true, env = "CKSMELL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan projects and write metrics and issue reports (default command)
    Scan {
        /// Output directory
        #[arg(long, short = 'o', default_value = "out")]
        output: PathBuf,

        /// Treat the root directory itself as a single project
        #[arg(long)]
        single_project: bool,

        /// Omit raw_source from the combined JSON metrics
        #[arg(long)]
        no_raw_source: bool,

        /// Exit with code 1 if findings at or above this severity exist
        #[arg(long, value_parser = ["minor", "major"])]
        fail_on: Option<String>,
    },

    /// Extract and classify a single file
    Inspect {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a cksmell.toml with the default thresholds
    Init {
        /// Overwrite an existing cksmell.toml
        #[arg(long)]
        force: bool,
    },
}

/// Run the parsed command. Returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Some(Commands::Init { force }) => init::run(&cli.path, force).map(|_| 0),

        Some(Commands::Inspect { json }) => {
            let config_root = cli.path.parent().unwrap_or(Path::new("."));
            let config = resolve_config(config_root, cli.config.as_deref())?;
            inspect::run(&cli.path, &config, json).map(|_| 0)
        }

        Some(Commands::Scan {
            output,
            single_project,
            no_raw_source,
            fail_on,
        }) => {
            let fail_on = fail_on
                .as_deref()
                .map(str::parse::<Severity>)
                .transpose()?;
            let mut config = resolve_config(&cli.path, cli.config.as_deref())?;
            if no_raw_source {
                config.output.raw_source = false;
            }
            let options = scan::ScanArgs {
                output,
                single_project,
                workers: cli.workers,
                fail_on,
            };
            scan::run(&cli.path, &config, &options)
        }

        None => {
            let config = resolve_config(&cli.path, cli.config.as_deref())?;
            let options = scan::ScanArgs {
                output: PathBuf::from("out"),
                single_project: false,
                workers: cli.workers,
                fail_on: None,
            };
            scan::run(&cli.path, &config, &options)
        }
    }
}

/// Explicit `--config` must load; discovered files fall back to defaults
fn resolve_config(root: &Path, explicit: Option<&Path>) -> Result<ScanConfig> {
    match explicit {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))
        }
        None => Ok(load_scan_config(root)),
    }
}
