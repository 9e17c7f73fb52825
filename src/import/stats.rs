//! Per-archive import outcome.

use serde::Serialize;

use crate::parser::detect::ArchiveFormat;
use crate::parser::{SkipReason, SkipRecord};

/// What happened while importing one archive stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// Detected format, `None` for batch totals.
    pub format: Option<ArchiveFormat>,
    /// Archive size in bytes.
    pub bytes: u64,
    /// Messages that produced a complete record.
    pub parsed: u64,
    /// Records stored as new posts.
    pub created: u64,
    /// Records whose id was already stored.
    pub duplicates: u64,
    /// Newsgroup links added.
    pub groups_linked: u64,
    /// Messages discarded while the stream continued.
    pub skips: Vec<SkipRecord>,
    /// Set when the rest of the stream was abandoned.
    pub aborted: Option<String>,
}

impl ImportStats {
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format: Some(format),
            ..Default::default()
        }
    }

    /// Number of skips with the given reason.
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skips.iter().filter(|s| s.reason == reason).count()
    }

    /// Fold another archive's outcome into a batch total.
    pub fn absorb(&mut self, other: &ImportStats) {
        self.format = None;
        self.bytes += other.bytes;
        self.parsed += other.parsed;
        self.created += other.created;
        self.duplicates += other.duplicates;
        self.groups_linked += other.groups_linked;
        self.skips.extend_from_slice(&other.skips);
    }
}
