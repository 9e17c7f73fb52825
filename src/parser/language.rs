//! Crude language/spam heuristic: a message must contain a minimum share of
//! recognized dictionary words.

use std::sync::Arc;

use crate::tables::SpamDictionary;

/// Approves or rejects message bodies against a [`SpamDictionary`].
///
/// Without a dictionary the filter approves everything.
#[derive(Debug, Clone, Default)]
pub struct LanguageFilter {
    dictionary: Option<Arc<SpamDictionary>>,
}

impl LanguageFilter {
    pub fn new(dictionary: Option<Arc<SpamDictionary>>) -> Self {
        Self { dictionary }
    }

    /// Whether a dictionary is loaded and messages are actually checked.
    pub fn is_enabled(&self) -> bool {
        self.dictionary.is_some()
    }

    /// `true` when the body looks like the target language.
    pub fn accepts(&self, body: &str) -> bool {
        match &self.dictionary {
            Some(dictionary) => !is_spam(dictionary, body),
            None => true,
        }
    }
}

/// At least one in ten tokens must be a dictionary word.
///
/// Scanning stops as soon as the threshold is reached.
pub fn is_spam(dictionary: &SpamDictionary, body: &str) -> bool {
    let tokens = tokenize(body);
    let threshold = threshold(tokens.len());

    let mut matches = 0;
    for token in &tokens {
        if dictionary.contains(token) {
            matches += 1;
            if matches >= threshold {
                return false;
            }
        }
    }
    true
}

/// Lowercase, replace everything outside `[a-z0-9 ]` with a space, collapse
/// runs of spaces and split on single spaces.
///
/// A body that starts or ends with punctuation keeps an empty token at that
/// edge. Empty tokens never match but do count toward the threshold.
pub fn tokenize(body: &str) -> Vec<String> {
    let mut collapsed = String::with_capacity(body.len());
    for c in body.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            collapsed.push(c);
        } else if !collapsed.ends_with(' ') {
            collapsed.push(' ');
        }
    }
    collapsed.split(' ').map(str::to_string).collect()
}

/// `max(1, round(tokens / 10))`, rounding halves to even.
pub fn threshold(token_count: usize) -> usize {
    let tenth = (token_count as f64 / 10.0).round_ties_even() as usize;
    tenth.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Arc<SpamDictionary> {
        Arc::new(SpamDictionary::from_words(["the", "news", "net", "hello"]))
    }

    fn body(known: usize, total: usize) -> String {
        let mut words = Vec::with_capacity(total);
        for i in 0..total {
            if i < known {
                words.push("news".to_string());
            } else {
                words.push(format!("xq{i}"));
            }
        }
        words.join(" ")
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Hello, World!  It's   net.news\n42"),
            vec!["hello", "world", "it", "s", "net", "news", "42"]
        );
        assert_eq!(tokenize("  ...  "), vec!["", ""]);
        assert_eq!(tokenize(""), vec![""]);
        assert_eq!(tokenize("(hello)"), vec!["", "hello", ""]);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(threshold(0), 1);
        assert_eq!(threshold(4), 1);
        assert_eq!(threshold(100), 10);
        assert_eq!(threshold(95), 10);
        assert_eq!(threshold(85), 8);
        assert_eq!(threshold(15), 2);
        assert_eq!(threshold(25), 2);
    }

    #[test]
    fn test_nine_of_hundred_is_rejected() {
        let filter = LanguageFilter::new(Some(dictionary()));
        assert!(!filter.accepts(&body(9, 100)));
    }

    #[test]
    fn test_ten_of_hundred_is_accepted() {
        let filter = LanguageFilter::new(Some(dictionary()));
        assert!(filter.accepts(&body(10, 100)));
    }

    #[test]
    fn test_short_message_needs_one_word() {
        let filter = LanguageFilter::new(Some(dictionary()));
        assert!(filter.accepts("hello there"));
        assert!(!filter.accepts("zzz qqq"));
        assert!(!filter.accepts(""));
    }

    #[test]
    fn test_edge_punctuation_counts_toward_threshold() {
        let filter = LanguageFilter::new(Some(dictionary()));
        let words = body(1, 14);
        // 14 tokens: threshold 1
        assert!(filter.accepts(&words));
        // 16 tokens with the empty edges: threshold 2
        assert_eq!(tokenize(&format!("\"{words}\"")).len(), 16);
        assert!(!filter.accepts(&format!("\"{words}\"")));
    }

    #[test]
    fn test_no_dictionary_fails_open() {
        let filter = LanguageFilter::new(None);
        assert!(!filter.is_enabled());
        assert!(filter.accepts("zzz qqq"));
        assert!(filter.accepts(""));
    }
}
