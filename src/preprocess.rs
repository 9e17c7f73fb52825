//! Archive cleanup before import.
//!
//! Some archived posts carry transfer noise (mail-server banners, tape labels,
//! file listings) above the real header block. Cleaning drops everything up to
//! the blank line that precedes the first `From: ` header.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::import::collect_archive_files;

const FROM_HEADER: &[u8] = b"From: ";

/// Normalize line endings and strip the preamble above the header block.
///
/// Documents without a `From: ` line, or whose header block has no blank
/// line above it, keep their content (line endings are still normalized).
pub fn clean_bytes(data: &[u8]) -> Vec<u8> {
    let text = normalize_newlines(data);

    let mut blank_end = None;
    let mut pos = 0;
    while pos < text.len() {
        let end = text[pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(text.len(), |i| pos + i + 1);
        let line = &text[pos..end];

        if line.starts_with(FROM_HEADER) {
            return match blank_end {
                Some(cut) => text[cut..].to_vec(),
                None => text,
            };
        }
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            blank_end = Some(end);
        }
        pos = end;
    }
    text
}

/// `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' {
            if iter.peek() == Some(&&b'\n') {
                iter.next();
            }
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    out
}

/// Clean one file in place. Returns whether its content changed.
pub fn clean_file(path: &Path) -> Result<bool> {
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::FileNotFound(path.to_path_buf())
        } else {
            ImportError::io(path, e)
        }
    })?;
    let cleaned = clean_bytes(&data);
    if cleaned == data {
        debug!(path = %path.display(), "Already clean");
        return Ok(false);
    }
    std::fs::write(path, &cleaned).map_err(|e| ImportError::io(path, e))?;
    debug!(
        path = %path.display(),
        removed = data.len() - cleaned.len(),
        "Cleaned file"
    );
    Ok(true)
}

/// Clean a file, or every file below a directory. Returns how many changed.
pub fn clean_path(path: &Path) -> Result<usize> {
    let mut cleaned = 0;
    for file in collect_archive_files(path)? {
        if clean_file(&file)? {
            cleaned += 1;
        }
    }
    info!(path = %path.display(), cleaned, "Preprocessing finished");
    Ok(cleaned)
}
