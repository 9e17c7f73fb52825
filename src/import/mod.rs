//! Import pipeline: drive archive files through the parser into a store.

pub mod archive;
pub mod groups;
pub mod stats;

pub use archive::{ArchiveParser, ParseEvent, READ_BUFFER_SIZE};
pub use stats::ImportStats;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ImportError, Result};
use crate::store::PostStore;
use crate::tables::SharedTables;

/// Parse one archive file into `store`.
pub fn import_file<S: PostStore + ?Sized>(
    path: &Path,
    tables: &SharedTables,
    store: &mut S,
    progress: Option<&dyn Fn(u64, u64)>,
) -> Result<ImportStats> {
    let mut parser = ArchiveParser::open(path, tables)?;
    parser.process_all(store, progress)
}

/// Expand a path into the archive files below it.
///
/// A file is returned as is. A directory is walked recursively; hidden
/// entries are skipped and the result is sorted so imports are repeatable.
pub fn collect_archive_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| ImportError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ImportError::io(&dir, e))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let entry_path = entry.path();
            if entry_path.is_dir() {
                pending.push(entry_path);
            } else if entry_path.is_file() {
                files.push(entry_path);
            }
        }
    }
    files.sort();
    debug!(root = %path.display(), files = files.len(), "Collected archive files");
    Ok(files)
}
