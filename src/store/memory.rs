//! In-memory post store.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

use super::{InsertOutcome, PostStore};

/// Post metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub sender: String,
    pub timestamp: i64,
    pub subject: String,
}

/// Body row: message text plus the verbatim header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub body: String,
    pub raw_headers: String,
}

/// A [`PostStore`] backed by ordered maps, persisted with
/// [`super::snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    posts: BTreeMap<String, PostRecord>,
    bodies: BTreeMap<String, BodyRecord>,
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, id: &str) -> Option<&PostRecord> {
        self.posts.get(id)
    }

    pub fn body(&self, id: &str) -> Option<&BodyRecord> {
        self.bodies.get(id)
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Number of distinct newsgroups with at least one linked post.
    pub fn group_count(&self) -> usize {
        self.groups
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Total number of post/group links.
    pub fn link_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Oldest and newest timestamps, ignoring the `0` placeholder for
    /// unparsable dates.
    pub fn date_range(&self) -> Option<(i64, i64)> {
        let mut stamps = self
            .posts
            .values()
            .map(|p| p.timestamp)
            .filter(|&t| t != 0);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(min, max), t| (min.min(t), max.max(t))))
    }

    /// The `n` newsgroups with the most posts, most popular first.
    pub fn top_groups(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for group in self.groups.values().flatten() {
            *counts.entry(group.as_str()).or_default() += 1;
        }
        let mut sorted: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(g, c)| (g.to_string(), c))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted.truncate(n);
        sorted
    }
}

impl PostStore for MemoryStore {
    fn insert_post(
        &mut self,
        id: &str,
        sender: &str,
        timestamp: i64,
        subject: &str,
    ) -> Result<InsertOutcome> {
        if self.posts.contains_key(id) {
            return Ok(InsertOutcome::Duplicate);
        }
        self.posts.insert(
            id.to_string(),
            PostRecord {
                sender: sender.to_string(),
                timestamp,
                subject: subject.to_string(),
            },
        );
        Ok(InsertOutcome::Created)
    }

    fn insert_message_body(&mut self, id: &str, body: &str, raw_headers: &str) -> Result<()> {
        self.bodies
            .entry(id.to_string())
            .or_insert_with(|| BodyRecord {
                body: body.to_string(),
                raw_headers: raw_headers.to_string(),
            });
        Ok(())
    }

    fn groups_for(&self, id: &str) -> Result<BTreeSet<String>> {
        Ok(self.groups.get(id).cloned().unwrap_or_default())
    }

    fn link_group(&mut self, id: &str, group: &str) -> Result<()> {
        if !self.posts.contains_key(id) {
            return Err(ImportError::Store(format!(
                "cannot link unknown message '{id}' to '{group}'"
            )));
        }
        self.groups
            .entry(id.to_string())
            .or_default()
            .insert(group.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_post_reports_duplicates() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.insert_post("<1@a>", "alice", 100, "first").unwrap(),
            InsertOutcome::Created
        );
        assert_eq!(
            store.insert_post("<1@a>", "mallory", 200, "second").unwrap(),
            InsertOutcome::Duplicate
        );
        let post = store.post("<1@a>").unwrap();
        assert_eq!(post.sender, "alice");
        assert_eq!(post.subject, "first");
    }

    #[test]
    fn test_body_first_write_wins() {
        let mut store = MemoryStore::new();
        store.insert_message_body("<1@a>", "one", "H: 1\n").unwrap();
        store.insert_message_body("<1@a>", "two", "H: 2\n").unwrap();
        assert_eq!(store.body("<1@a>").unwrap().body, "one");
    }

    #[test]
    fn test_group_links() {
        let mut store = MemoryStore::new();
        store.insert_post("<1@a>", "alice", 100, "s").unwrap();
        store.link_group("<1@a>", "net.news").unwrap();
        store.link_group("<1@a>", "net.general").unwrap();
        store.link_group("<1@a>", "net.news").unwrap();

        let groups = store.groups_for("<1@a>").unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.contains("net.general"));
        assert!(store.groups_for("<2@a>").unwrap().is_empty());
        assert!(store.link_group("<2@a>", "net.news").is_err());
    }

    #[test]
    fn test_statistics() {
        let mut store = MemoryStore::new();
        store.insert_post("<1@a>", "a", 300, "s").unwrap();
        store.insert_post("<2@a>", "b", 0, "s").unwrap();
        store.insert_post("<3@a>", "c", 100, "s").unwrap();
        store.link_group("<1@a>", "net.news").unwrap();
        store.link_group("<2@a>", "net.news").unwrap();
        store.link_group("<3@a>", "net.general").unwrap();

        assert_eq!(store.post_count(), 3);
        assert_eq!(store.group_count(), 2);
        assert_eq!(store.link_count(), 3);
        assert_eq!(store.date_range(), Some((100, 300)));
        assert_eq!(
            store.top_groups(1),
            vec![("net.news".to_string(), 2)]
        );
    }
}
