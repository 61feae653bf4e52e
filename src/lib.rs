//! cksmell - class-level metrics and smell labels for Java sources
//!
//! A pattern-based extractor turns one compilation unit into a
//! [`MetricRecord`](models::MetricRecord); a rule engine labels structural
//! smells from those metrics alone; the traversal runs both over a corpus of
//! projects on a worker pool.
//!
//! ```no_run
//! use cksmell::config::ScanConfig;
//! use cksmell::traversal::{scan_corpus, ScanOptions};
//! use std::path::Path;
//!
//! let corpus = scan_corpus(Path::new("projects"), &ScanConfig::default(), &ScanOptions::default(), None)?;
//! println!("{} units, {} skipped", corpus.unit_count(), corpus.skipped_count());
//! # Ok::<(), cksmell::error::ScanError>(())
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod traversal;
