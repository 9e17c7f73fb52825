//! Newsgroup list handling.

use std::collections::{BTreeSet, HashSet};

/// Split a raw `Newsgroups` value into names.
///
/// Names are separated by commas; some archives use spaces instead, so
/// whitespace separates too. Empty entries are dropped.
pub fn parse_newsgroups(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Groups from `parsed` that still need a link: not already in `existing`
/// and not repeated earlier in `parsed`. Order is preserved.
pub fn residual_groups<'a>(parsed: &'a [String], existing: &BTreeSet<String>) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    parsed
        .iter()
        .map(String::as_str)
        .filter(|group| !existing.contains(*group) && seen.insert(*group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_newsgroups() {
        assert_eq!(
            parse_newsgroups("net.general,net.news"),
            vec!["net.general", "net.news"]
        );
        assert_eq!(
            parse_newsgroups(" net.general, ,, net.news ,"),
            vec!["net.general", "net.news"]
        );
        assert_eq!(parse_newsgroups("net.a net.b"), vec!["net.a", "net.b"]);
        assert!(parse_newsgroups(" , ").is_empty());
    }

    #[test]
    fn test_residual_groups() {
        let parsed: Vec<String> = ["net.a", "net.b", "net.a", "net.c"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let existing: BTreeSet<String> = ["net.b".to_string()].into_iter().collect();
        assert_eq!(residual_groups(&parsed, &existing), vec!["net.a", "net.c"]);
        assert_eq!(
            residual_groups(&parsed, &BTreeSet::new()),
            vec!["net.a", "net.b", "net.c"]
        );
    }
}
