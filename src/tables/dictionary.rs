//! Word list for the language heuristic.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{ImportError, Result};

/// Immutable set of lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpamDictionary {
    words: HashSet<String>,
}

impl SpamDictionary {
    /// Build a dictionary from any iterator of words. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parse a JSON dictionary: either a `{"word": 1}` index (keys are used)
    /// or an array of strings.
    pub fn parse_json(text: &str) -> std::result::Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        match value {
            serde_json::Value::Object(map) => Ok(Self::from_words(map.keys())),
            serde_json::Value::Array(items) => Ok(Self::from_words(
                items.iter().filter_map(|item| item.as_str()),
            )),
            _ => Err("expected a JSON object or array".into()),
        }
    }

    /// Parse a plain word list, one word per line.
    pub fn parse_word_list(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Load a dictionary file. `.json` files are parsed as JSON, anything else
    /// as a word list.
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

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dictionary = if is_json {
            Self::parse_json(&text).map_err(|reason| ImportError::InvalidTable {
                path: path.to_path_buf(),
                reason,
            })?
        } else {
            Self::parse_word_list(&text)
        };

        info!(path = %path.display(), words = dictionary.len(), "Loaded dictionary");
        Ok(dictionary)
    }

    /// Load the dictionary if configured. Returns `None` (after one warning)
    /// when it is missing, unreadable or empty, which disables the filter.
    pub fn load_optional(path: Option<&Path>) -> Option<Self> {
        let Some(path) = path else {
            warn!("No dictionary configured - messages will not be checked for spam");
            return None;
        };
        match Self::load(path) {
            Ok(dictionary) if !dictionary.is_empty() => Some(dictionary),
            Ok(_) => {
                warn!(path = %path.display(), "Dictionary is empty - messages will not be checked for spam");
                None
            }
            Err(e) => {
                warn!(error = %e, "Could not load spam check dictionary - messages will not be checked for spam");
                None
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
