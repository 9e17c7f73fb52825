//! Archive parsing engine: format detection, message segmentation, header
//! extraction, timestamp normalization and the language heuristic.

pub mod anews;
pub mod date;
pub mod detect;
pub mod header;
pub mod language;
pub mod mbox;

use std::fmt;
use std::io::BufRead;

use serde::Serialize;

use crate::model::message::RawMessage;

/// Per-archive cursor, owned by the archive parser for one open stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmenterState {
    /// Byte offset of the next unread message.
    pub offset: u64,
    /// Messages that produced a complete record so far.
    pub parsed: u64,
    /// Messages the store accepted as new posts.
    pub accepted: u64,
}

impl SegmenterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Why a single message was discarded while the stream kept going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing but whitespace between two boundaries.
    EmptyBuffer,
    /// A block without a leading `From ` line after the first message.
    MissingSeparator,
    /// A `From ` line with nothing after it (corrupt archive).
    OrphanSeparator,
    /// A required header was absent after alias fill-in.
    MissingField(&'static str),
    /// The language heuristic rejected the body.
    LanguageFilter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBuffer => write!(f, "empty buffer"),
            Self::MissingSeparator => write!(f, "message lacks starting 'From' line"),
            Self::OrphanSeparator => write!(f, "message is empty apart from its 'From' line"),
            Self::MissingField(name) => write!(f, "missing header '{name}'"),
            Self::LanguageFilter => write!(f, "probably spam"),
        }
    }
}

/// A recoverable skip together with where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkipRecord {
    pub offset: u64,
    pub reason: SkipReason,
}

/// Result of asking a segmenter for the next message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Message(RawMessage),
    Skipped(SkipRecord),
    /// True end of stream.
    Exhausted,
}

/// One decoded line and the number of archive bytes it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub text: String,
    pub len: u64,
}

/// Read one `\n`-terminated line and decode it from the archive's 8-bit
/// encoding. Returns `None` at end of stream.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<Line>> {
    buf.clear();
    let len = reader.read_until(b'\n', buf)?;
    if len == 0 {
        return Ok(None);
    }
    let mut content = &buf[..];
    if let Some(stripped) = content.strip_suffix(b"\n") {
        content = stripped;
    }
    if let Some(stripped) = content.strip_suffix(b"\r") {
        content = stripped;
    }
    let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(content);
    Ok(Some(Line {
        text: text.into_owned(),
        len: len as u64,
    }))
}

/// Whether a line is empty or whitespace only.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
