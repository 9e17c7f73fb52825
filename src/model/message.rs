//! Message types flowing through the import pipeline.

use serde::{Deserialize, Serialize};

use super::headers::HeaderMap;

/// One post's unparsed text as cut out of the archive by a segmenter.
///
/// Lines carry no trailing newline. The mbox `From ` separator line is
/// still present when the segmenter found one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Byte offset of the first line inside the archive.
    pub offset: u64,
    /// Byte offset one past the last consumed line.
    pub end: u64,
    /// The raw lines, in order.
    pub lines: Vec<String>,
}

impl RawMessage {
    /// Number of archive bytes this message occupied.
    pub fn byte_len(&self) -> u64 {
        self.end - self.offset
    }
}

/// A message split into its header map, body and verbatim header text.
///
/// Produced by the header parser for mbox archives and directly by the
/// A News segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageParts {
    /// Byte offset of the message inside the archive.
    pub offset: u64,
    pub headers: HeaderMap,
    pub body: String,
    pub raw_headers: String,
}

/// The normalized record handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Message identifier, the stable key of the post.
    pub message_id: String,
    /// Raw `From` value (bang paths are kept as they are).
    pub sender: String,
    /// Seconds since the Unix epoch, `0` when the date could not be parsed.
    pub timestamp: i64,
    pub subject: String,
    /// Newsgroup names in header order, without empties.
    pub newsgroups: Vec<String>,
    /// Message body, header block excluded.
    pub body: String,
    /// Header block text exactly as it appeared in the archive.
    pub raw_headers: String,
}
