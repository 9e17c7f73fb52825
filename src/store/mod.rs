//! Persistence collaborator: the contract the importer writes through, an
//! in-memory implementation and its on-disk snapshot.

pub mod memory;
pub mod snapshot;

use std::collections::BTreeSet;

use crate::error::Result;

pub use memory::MemoryStore;

/// Outcome of inserting a post keyed by message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// The id was already stored; nothing was written.
    Duplicate,
}

/// Storage operations used by the importer.
///
/// Implementations enforce uniqueness of the message id. Taking `&mut self`
/// keeps the duplicate check and the following group merge atomic with
/// respect to one store.
pub trait PostStore {
    /// Insert post metadata unless the id already exists.
    fn insert_post(
        &mut self,
        id: &str,
        sender: &str,
        timestamp: i64,
        subject: &str,
    ) -> Result<InsertOutcome>;

    /// Store body and raw header text. A no-op if the id already has a body.
    fn insert_message_body(&mut self, id: &str, body: &str, raw_headers: &str) -> Result<()>;

    /// Newsgroups already linked to an id.
    fn groups_for(&self, id: &str) -> Result<BTreeSet<String>>;

    /// Link an id to a newsgroup.
    fn link_group(&mut self, id: &str, group: &str) -> Result<()>;
}
