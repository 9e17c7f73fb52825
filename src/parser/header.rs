//! Header block extraction: `token: value` lines, continuation folding,
//! repeated-header accumulation and legacy alias fill-in.

use crate::error::{ImportError, Result};
use crate::model::headers::HeaderMap;
use crate::model::message::{MessageParts, RawMessage};

use super::is_blank;

/// Split a `token: value` header line into its name and value.
///
/// The token may not contain spaces and must be followed by `": "`; lines
/// like `Subject:` (no space after the colon) or ` indented: text` do not
/// qualify and are treated as continuations by [`parse_header_block`].
pub fn split_header_line(line: &str) -> Option<(&str, &str)> {
    let space = line.find(' ')?;
    let name = line[..space].strip_suffix(':')?;
    if name.is_empty() {
        return None;
    }
    Some((name, &line[space + 1..]))
}

/// Split a segmented message into headers and body.
///
/// Scanning stops at the first blank line, or at the first line that is not a
/// header when no header has been seen yet. Lines that do not look like
/// headers after a header has been seen are folded into that header's value.
///
/// Body reconstruction: the text of the line that stopped the scan is put in
/// front of the remaining lines joined with `\n`. That line is blank, so an
/// empty separator adds nothing and a whitespace-only one keeps its spaces.
///
/// Returns [`ImportError::NotAnArchive`] when no header at all was found.
pub fn parse_header_block(raw: RawMessage) -> Result<MessageParts> {
    let offset = raw.offset;
    let mut headers = HeaderMap::new();
    let mut raw_headers = String::new();
    let mut current: Option<String> = None;
    let mut stop_line: Option<String> = None;

    let mut lines = raw.lines.into_iter();
    for line in lines.by_ref() {
        if is_blank(&line) {
            stop_line = Some(line);
            break;
        }

        let field = split_header_line(&line).map(|(name, value)| (name.to_lowercase(), value.to_string()));
        match field {
            Some((name, value)) => {
                headers.append(&name, &value);
                current = Some(name);
            }
            None => match &current {
                Some(name) => headers.append(name, line.trim_start()),
                None => {
                    stop_line = Some(line);
                    break;
                }
            },
        }

        raw_headers.push_str(&line);
        raw_headers.push('\n');
    }

    if headers.is_empty() {
        return Err(ImportError::NotAnArchive { offset });
    }
    headers.apply_aliases();

    // Only a whitespace-only line can stop the scan once a header exists, so
    // the stop line contributes at most some leading indentation.
    let mut body = stop_line.unwrap_or_default();
    let rest: Vec<String> = lines.collect();
    body.push_str(&rest.join("\n"));

    Ok(MessageParts {
        offset,
        headers,
        body,
        raw_headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawMessage {
        RawMessage {
            offset: 0,
            end: text.len() as u64,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_split_header_line() {
        assert_eq!(split_header_line("Subject: Hello"), Some(("Subject", "Hello")));
        assert_eq!(split_header_line("Subject: "), Some(("Subject", "")));
        assert_eq!(split_header_line("a:b: c"), Some(("a:b", "c")));
        assert_eq!(split_header_line("Date: Mon, 1 Jan 90"), Some(("Date", "Mon, 1 Jan 90")));
        assert_eq!(split_header_line("Subject:"), None);
        assert_eq!(split_header_line("X-Foo:bar"), None);
        assert_eq!(split_header_line(" world"), None);
        assert_eq!(split_header_line(": value"), None);
        assert_eq!(split_header_line("just some text"), None);
    }

    #[test]
    fn test_continuation_is_space_joined() {
        let parts = parse_header_block(raw("Subject: Hello\n world\nFrom: a\n\nbody")).unwrap();
        assert_eq!(parts.headers.get("subject"), Some("Hello world"));
        assert_eq!(parts.headers.get("from"), Some("a"));
        assert_eq!(parts.body, "body");
    }

    #[test]
    fn test_repeated_header_accumulates() {
        let parts =
            parse_header_block(raw("Newsgroups: net.general\nNewsgroups: net.news\n\n")).unwrap();
        assert_eq!(parts.headers.get("newsgroups"), Some("net.general net.news"));
    }

    #[test]
    fn test_article_id_alias() {
        let parts = parse_header_block(raw("Article-I.D.: x\nTitle: old\n\nbody")).unwrap();
        assert_eq!(parts.headers.get("message-id"), Some("x"));
        assert_eq!(parts.headers.get("subject"), Some("old"));
    }

    #[test]
    fn test_raw_headers_are_verbatim() {
        let parts = parse_header_block(raw("From: a\nSubject: Hi\n  there\n\nbody\nmore")).unwrap();
        assert_eq!(parts.raw_headers, "From: a\nSubject: Hi\n  there\n");
        assert_eq!(parts.body, "body\nmore");
    }

    #[test]
    fn test_body_keeps_blank_lines_after_separator() {
        let parts = parse_header_block(raw("From: a\n\n\nparagraph one\n\nparagraph two")).unwrap();
        assert_eq!(parts.body, "\nparagraph one\n\nparagraph two");
    }

    #[test]
    fn test_whitespace_stop_line_prefixes_body() {
        let parts = parse_header_block(raw("From: a\nSubject: b\n   \nbody\nmore")).unwrap();
        assert_eq!(parts.body, "   body\nmore");
        assert_eq!(parts.raw_headers, "From: a\nSubject: b\n");
    }

    #[test]
    fn test_headers_only_message_has_empty_body() {
        let parts = parse_header_block(raw("From: a\nSubject: b")).unwrap();
        assert_eq!(parts.body, "");
        assert_eq!(parts.headers.len(), 2);
    }

    #[test]
    fn test_no_headers_is_not_an_archive() {
        let err = parse_header_block(raw("this is prose\nwith no headers")).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArchive { offset: 0 }));
    }

    #[test]
    fn test_blank_first_line_is_not_an_archive() {
        let err = parse_header_block(raw("\nFrom: a")).unwrap_err();
        assert!(err.is_stream_fatal());
    }
}
