//! Static lookup tables loaded once at startup and shared read-only:
//! timezone abbreviations and the word list used by the language filter.

pub mod dictionary;
pub mod timezone;

use std::path::Path;
use std::sync::Arc;

pub use dictionary::SpamDictionary;
pub use timezone::TimezoneTable;

/// Both tables behind `Arc`s, cheap to clone into every archive parser.
#[derive(Debug, Clone, Default)]
pub struct SharedTables {
    pub zones: Arc<TimezoneTable>,
    /// `None` disables the language filter.
    pub dictionary: Option<Arc<SpamDictionary>>,
}

impl SharedTables {
    pub fn new(zones: TimezoneTable, dictionary: Option<SpamDictionary>) -> Self {
        Self {
            zones: Arc::new(zones),
            dictionary: dictionary.map(Arc::new),
        }
    }

    /// Load both tables, degrading (with one warning each) on failure.
    pub fn load(dictionary: Option<&Path>, timezones: Option<&Path>) -> Self {
        Self::new(
            TimezoneTable::load_or_empty(timezones),
            SpamDictionary::load_optional(dictionary),
        )
    }
}
