//! Binary snapshot file for [`MemoryStore`].
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ HEADER (128 bytes, fixed)            │
//! │  magic: [u8; 8] = b"USENETDB"        │
//! │  version: u32                        │
//! │  flags: u32                          │
//! │  post_count: u64                     │
//! │  sha256_payload: [u8; 32]            │
//! │  (padding to 128 bytes)              │
//! ├──────────────────────────────────────┤
//! │ PAYLOAD (variable)                   │
//! │  bincode-serialized MemoryStore      │
//! └──────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{ImportError, Result};

use super::MemoryStore;

/// Magic bytes identifying a store snapshot.
pub const MAGIC: &[u8; 8] = b"USENETDB";

/// Current snapshot format version.
pub const VERSION: u32 = 1;

/// Fixed header size in bytes.
pub const HEADER_SIZE: usize = 128;

/// Serializable snapshot header.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SnapshotHeader {
    /// Magic bytes (must equal [`MAGIC`]).
    pub magic: [u8; 8],
    /// Format version (must equal [`VERSION`]).
    pub version: u32,
    /// Reserved flags (currently unused).
    pub flags: u32,
    /// Number of posts in the payload.
    pub post_count: u64,
    /// SHA-256 of the payload bytes.
    pub sha256_payload: [u8; 32],
}

impl SnapshotHeader {
    /// Validate that the header is well-formed and matches the current format.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.magic != *MAGIC {
            return Err("Invalid magic bytes".into());
        }
        if self.version != VERSION {
            return Err(format!(
                "Incompatible version: expected {VERSION}, found {}",
                self.version
            ));
        }
        Ok(())
    }
}

/// Write the store to `path`, replacing any previous snapshot.
pub fn save(path: &Path, store: &MemoryStore) -> Result<()> {
    let invalid = |reason: String| ImportError::InvalidSnapshot {
        path: path.to_path_buf(),
        reason,
    };

    let payload = bincode::serialize(store).map_err(|e| invalid(e.to_string()))?;
    let header = SnapshotHeader {
        magic: *MAGIC,
        version: VERSION,
        flags: 0,
        post_count: store.post_count() as u64,
        sha256_payload: Sha256::digest(&payload).into(),
    };
    let header_bytes = bincode::serialize(&header).map_err(|e| invalid(e.to_string()))?;

    // Pad header to HEADER_SIZE
    let mut padded_header = vec![0u8; HEADER_SIZE];
    let copy_len = header_bytes.len().min(HEADER_SIZE);
    padded_header[..copy_len].copy_from_slice(&header_bytes[..copy_len]);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ImportError::io(parent, e))?;
    }

    let mut file = File::create(path).map_err(|e| ImportError::io(path, e))?;
    file.write_all(&padded_header)
        .map_err(|e| ImportError::io(path, e))?;
    file.write_all(&payload)
        .map_err(|e| ImportError::io(path, e))?;
    file.flush().map_err(|e| ImportError::io(path, e))?;

    info!(path = %path.display(), posts = header.post_count, "Snapshot written");
    Ok(())
}

/// Load a snapshot, validating magic, version, checksum and post count.
pub fn load(path: &Path) -> Result<MemoryStore> {
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::FileNotFound(path.to_path_buf())
        } else {
            ImportError::io(path, e)
        }
    })?;
    let invalid = |reason: String| ImportError::InvalidSnapshot {
        path: path.to_path_buf(),
        reason,
    };

    if data.len() < HEADER_SIZE {
        return Err(invalid("file too small".into()));
    }

    let header: SnapshotHeader = bincode::deserialize(&data[..HEADER_SIZE])
        .map_err(|e| invalid(format!("Header deserialization failed: {e}")))?;
    header.validate().map_err(invalid)?;

    let payload = &data[HEADER_SIZE..];
    let digest: [u8; 32] = Sha256::digest(payload).into();
    if digest != header.sha256_payload {
        return Err(invalid("payload checksum mismatch".into()));
    }

    let store: MemoryStore = bincode::deserialize(payload)
        .map_err(|e| invalid(format!("Payload deserialization failed: {e}")))?;
    if store.post_count() as u64 != header.post_count {
        return Err(invalid("post count mismatch".into()));
    }

    debug!(path = %path.display(), posts = header.post_count, "Loaded snapshot");
    Ok(store)
}

/// Load a snapshot, or start an empty store when the file does not exist yet.
pub fn load_or_default(path: &Path) -> Result<MemoryStore> {
    match load(path) {
        Ok(store) => Ok(store),
        Err(ImportError::FileNotFound(_)) => {
            debug!(path = %path.display(), "No snapshot yet, starting empty");
            Ok(MemoryStore::new())
        }
        Err(e) => Err(e),
    }
}
