//! Reading compilation units from disk

use crate::config::ScanSettings;
use crate::error::{ScanError, ScanResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and decode one unit.
///
/// Files over `max_file_bytes` are rejected before reading. See
/// [`decode_unit`] for the decoding policy.
pub fn read_unit(path: &Path, settings: &ScanSettings) -> ScanResult<String> {
    let size = fs::metadata(path)
        .map_err(|e| ScanError::unreadable(path, e))?
        .len();
    if size > settings.max_file_bytes {
        return Err(ScanError::Oversized {
            path: path.to_path_buf(),
            size,
            limit: settings.max_file_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|e| ScanError::unreadable(path, e))?;
    decode_unit(path, bytes, settings.strict_utf8)
}

/// Decode raw bytes as source text.
///
/// Content with a NUL byte is binary and fails. Invalid UTF-8 is replaced
/// with U+FFFD, or fails when `strict_utf8` is set.
pub fn decode_unit(path: &Path, bytes: Vec<u8>, strict_utf8: bool) -> ScanResult<String> {
    if let Some(offset) = memchr::memchr(0, &bytes) {
        return Err(ScanError::unreadable(
            path,
            format!("binary content (NUL byte at offset {})", offset),
        ));
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) if strict_utf8 => Err(ScanError::unreadable(
            path,
            format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        )),
        Err(e) => {
            debug!("Replacing invalid UTF-8 in {}", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
