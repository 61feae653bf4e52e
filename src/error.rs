//! Error taxonomy for scanning a corpus
//!
//! Per-file errors (`UnreadableFile`, `Oversized`) are skipped and counted
//! by the traversal. `MissingRoot` and `Output` stop the run.
//!
//! Missing patterns and unbalanced braces are not errors at all: the
//! extractor resolves both to documented defaults.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Unreadable file {}: {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Skipping {}: {size} bytes exceeds the {limit} byte limit", path.display())]
    Oversized { path: PathBuf, size: u64, limit: u64 },

    #[error("Projects root {} does not exist or is not a directory", path.display())]
    MissingRoot { path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub(crate) fn unreadable(path: &Path, reason: impl ToString) -> Self {
        ScanError::UnreadableFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error must abort the run instead of skipping one file
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::MissingRoot { .. } | ScanError::Output { .. })
    }

    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            ScanError::UnreadableFile { path, .. }
            | ScanError::Oversized { path, .. }
            | ScanError::MissingRoot { path }
            | ScanError::Output { path, .. } => path,
        }
    }
}
