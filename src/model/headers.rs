//! Accumulating, case-insensitive header map.

use std::collections::HashMap;

/// Legacy field names filled into their modern counterparts, in order.
///
/// Each pair is `(primary, fallback)`: the fallback's value is copied to the
/// primary only when the primary is absent.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("message-id", "article-i.d."),
    ("date", "posted"),
    ("subject", "title"),
];

/// Mapping from lower-cased header name to a single accumulated value.
///
/// Repeated headers and continuation lines are space-joined onto the existing
/// value; nothing is ever overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for `name`, joining it onto any existing value with a space.
    pub fn append(&mut self, name: &str, value: &str) {
        let key = name.to_lowercase();
        match self.fields.get_mut(&key) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(value);
            }
            None => {
                self.fields.insert(key, value.to_string());
            }
        }
    }

    /// Value for a header name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(lowercase_name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply [`HEADER_ALIASES`] once. Existing fields are never replaced.
    pub fn apply_aliases(&mut self) {
        for (primary, fallback) in HEADER_ALIASES {
            if self.fields.contains_key(*primary) {
                continue;
            }
            if let Some(value) = self.fields.get(*fallback).cloned() {
                self.fields.insert((*primary).to_string(), value);
            }
        }
    }
}
