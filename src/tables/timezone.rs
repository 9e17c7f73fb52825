//! Timezone abbreviation table.
//!
//! The source file lists one zone per line as `<hours> <ABBR> [<ABBR>...]`,
//! for example `-8 PST PT HNP` or `5.5 IST`. Hours may be fractional.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{ImportError, Result};

/// Immutable mapping from zone abbreviation to UTC offset in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneTable {
    offsets: HashMap<String, i32>,
}

impl TimezoneTable {
    /// A table with no entries. Named zones then contribute no offset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(abbreviation, offset_seconds)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            offsets: entries
                .into_iter()
                .map(|(abbr, secs)| (abbr.into(), secs))
                .collect(),
        }
    }

    /// Parse the text table format. Malformed lines are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut offsets = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(hours) = fields.next() else {
                continue;
            };
            let Ok(hours) = hours.parse::<f64>() else {
                warn!(line = lineno + 1, content = line, "Skipping malformed timezone line");
                continue;
            };
            let seconds = (hours * 3600.0) as i32;
            for abbreviation in fields {
                offsets.insert(abbreviation.to_string(), seconds);
            }
        }
        Self { offsets }
    }

    /// Load a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImportError::FileNotFound(path.to_path_buf())
            } else {
                ImportError::io(path, e)
            }
        })?;
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
        let table = Self::parse(&text);
        if table.is_empty() {
            return Err(ImportError::InvalidTable {
                path: path.to_path_buf(),
                reason: "no timezone entries".into(),
            });
        }
        info!(path = %path.display(), zones = table.len(), "Loaded timezone table");
        Ok(table)
    }

    /// Load the table if a path is configured, degrading to an empty table
    /// (with a single warning) when it is missing or unreadable.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            warn!("No timezone table configured - named timezones will not be resolved");
            return Self::empty();
        };
        match Self::load(path) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    error = %e,
                    "Could not load timezones - dates may not be parsed correctly"
                );
                Self::empty()
            }
        }
    }

    /// Offset in seconds east of UTC for an abbreviation.
    ///
    /// Exact matches win; otherwise the upper-cased abbreviation is tried so
    /// that `pst` resolves like `PST`.
    pub fn offset(&self, abbreviation: &str) -> Option<i32> {
        self.offsets
            .get(abbreviation)
            .or_else(|| self.offsets.get(&abbreviation.to_uppercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_lines() {
        let table = TimezoneTable::parse("-8 PST PT HNP\n-7 PDT\n5.5 IST\n");
        assert_eq!(table.offset("PST"), Some(-28800));
        assert_eq!(table.offset("PT"), Some(-28800));
        assert_eq!(table.offset("HNP"), Some(-28800));
        assert_eq!(table.offset("PDT"), Some(-25200));
        assert_eq!(table.offset("IST"), Some(19800));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_parse_skips_comments_and_garbage() {
        let table = TimezoneTable::parse("# comment\n\nnonsense XYZ\n0 GMT\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.offset("XYZ"), None);
        assert_eq!(table.offset("GMT"), Some(0));
    }

    #[test]
    fn test_lookup_falls_back_to_uppercase() {
        let table = TimezoneTable::from_entries([("EST", -18000)]);
        assert_eq!(table.offset("est"), Some(-18000));
        assert_eq!(table.offset("CET"), None);
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let table = TimezoneTable::load_or_empty(Some(Path::new("/nonexistent/timezones")));
        assert!(table.is_empty());
        assert!(TimezoneTable::load_or_empty(None).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timezones");
        std::fs::write(&path, "-5 EST\n1 CET MET\n").unwrap();
        let table = TimezoneTable::load(&path).unwrap();
        assert_eq!(table.offset("MET"), Some(3600));
    }
}
