//! Streaming mbox segmenter.
//!
//! Messages are cut out one at a time with a single line of lookahead. A
//! `From ` line only starts a new message when it follows at least two blank
//! lines *and* the line after it looks like a header, which keeps quoted
//! `From ` lines inside bodies from splitting a post.

use std::io::{BufRead, Seek, SeekFrom};

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::message::RawMessage;

use super::header::split_header_line;
use super::{is_blank, read_line, Segment, SegmenterState, SkipReason, SkipRecord};

/// Blank lines that must precede a `From ` line for it to count as a boundary.
const MIN_BOUNDARY_GAP: u32 = 2;

/// Splits mbox-style archives into raw messages.
///
/// The segmenter itself holds only a reusable line buffer; the read position
/// lives in the caller's [`SegmenterState`].
#[derive(Debug, Default)]
pub struct MboxSegmenter {
    line_buf: Vec<u8>,
}

impl MboxSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cut the next message out of the stream, starting at `state.offset`.
    ///
    /// Advances `state.offset` past every consumed line. The `From ` line that
    /// ends a message is left unconsumed so the next call starts on it.
    pub fn next_segment<R: BufRead + Seek>(
        &mut self,
        reader: &mut R,
        state: &mut SegmenterState,
    ) -> Result<Segment> {
        let start = state.offset;
        reader.seek(SeekFrom::Start(start))?;

        let Some(mut line) = read_line(reader, &mut self.line_buf)? else {
            return Ok(Segment::Exhausted);
        };

        let mut lines: Vec<String> = Vec::new();
        let mut gap: u32 = 0;

        loop {
            let next = read_line(reader, &mut self.line_buf)?;
            let next_is_header = next
                .as_ref()
                .is_some_and(|n| split_header_line(&n.text).is_some());

            if is_separator(&line.text) && gap >= MIN_BOUNDARY_GAP && next_is_header {
                debug!(offset = state.offset, "Message boundary");
                break;
            }

            state.offset += line.len;
            if is_blank(&line.text) {
                gap += 1;
            } else {
                gap = 0;
            }
            lines.push(line.text);

            match next {
                Some(n) => line = n,
                // Lookahead hit EOF: flush what we have as the last message.
                None => break,
            }
        }

        let end = state.offset;
        trim_buffer(&mut lines);

        if lines.is_empty() {
            warn!(offset = start, "Empty buffer, skipping");
            return Ok(skipped(start, SkipReason::EmptyBuffer));
        }

        if is_separator_prefix(&lines[0]) {
            lines.remove(0);
            if lines.is_empty() {
                warn!(
                    offset = start,
                    "Message is empty apart from From line, skipping (check for corrupt archive?)"
                );
                return Ok(skipped(start, SkipReason::OrphanSeparator));
            }
        } else if state.parsed > 0 {
            warn!(offset = start, "Message lacks starting 'From' line, skipping");
            return Ok(skipped(start, SkipReason::MissingSeparator));
        }

        let message = RawMessage {
            offset: start,
            end,
            lines,
        };
        debug!(
            offset = start,
            bytes = message.byte_len(),
            lines = message.lines.len(),
            "Segmented message"
        );
        Ok(Segment::Message(message))
    }
}

fn skipped(offset: u64, reason: SkipReason) -> Segment {
    Segment::Skipped(SkipRecord { offset, reason })
}

/// `From ` followed by at least one more character.
fn is_separator(line: &str) -> bool {
    line.len() > 5 && line.starts_with("From ")
}

/// Separator test on an already trimmed buffer, where a bare `From ` may have
/// lost its trailing space.
fn is_separator_prefix(line: &str) -> bool {
    line.starts_with("From ") || line == "From"
}

/// Strip leading and trailing whitespace from the buffer as a whole.
fn trim_buffer(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| is_blank(l)).count();
    lines.drain(..leading);

    if let Some(first) = lines.first_mut() {
        let trimmed = first.trim_start();
        if trimmed.len() != first.len() {
            *first = trimmed.to_string();
        }
    }
    if let Some(last) = lines.last_mut() {
        let keep = last.trim_end().len();
        last.truncate(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn segments(text: &str) -> Vec<Segment> {
        let mut reader = Cursor::new(text.as_bytes().to_vec());
        let mut state = SegmenterState::default();
        let mut segmenter = MboxSegmenter::new();
        let mut out = Vec::new();
        loop {
            match segmenter.next_segment(&mut reader, &mut state).unwrap() {
                Segment::Exhausted => break,
                segment => {
                    if matches!(segment, Segment::Message(_)) {
                        state.parsed += 1;
                    }
                    out.push(segment);
                }
            }
        }
        out
    }

    fn messages(text: &str) -> Vec<RawMessage> {
        segments(text)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_is_separator() {
        assert!(is_separator("From user@host Mon Jan  1 00:00:00 1990"));
        assert!(is_separator("From x"));
        assert!(!is_separator("From "));
        assert!(!is_separator("From: user@host"));
        assert!(!is_separator(">From user@host"));
        assert!(!is_separator("from user@host"));
    }

    #[test]
    fn test_single_message_drops_separator() {
        let msgs = messages("From a Mon Jan 1 1990\nFrom: a\nSubject: s\n\nhello\n");
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].lines, vec!["From: a", "Subject: s", "", "hello"]);
        assert_eq!(msgs[0].offset, 0);
    }

    #[test]
    fn test_two_messages_split_on_double_gap() {
        let text = "From a 1990\nFrom: a\n\nbody one\n\n\nFrom b 1990\nFrom: b\n\nbody two\n";
        let msgs = messages(text);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].lines, vec!["From: a", "", "body one"]);
        assert_eq!(msgs[1].lines, vec!["From: b", "", "body two"]);
        assert_eq!(msgs[1].offset, text.find("From b").unwrap() as u64);
        assert_eq!(msgs[0].end, msgs[1].offset);
        assert_eq!(msgs[0].byte_len(), msgs[1].offset);
    }

    #[test]
    fn test_single_blank_line_is_not_a_boundary() {
        let text = "From a 1990\nFrom: a\n\nbody one\n\nFrom b 1990\nFrom: b\n\nbody two\n";
        let msgs = messages(text);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].lines.contains(&"From b 1990".to_string()));
    }

    #[test]
    fn test_quoted_from_in_body_does_not_split() {
        let text = "From a 1990\nFrom: a\n\nI said\n\n\nFrom the start it was clear.\nreally.\n";
        let msgs = messages(text);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].lines.last().unwrap(), "really.");
    }

    #[test]
    fn test_first_message_without_separator_is_accepted() {
        let msgs = messages("From: a\nSubject: s\n\nhello\n");
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].lines[0], "From: a");
    }

    #[test]
    fn test_orphan_separator_is_skipped() {
        let segs = segments("From nobody Mon Jan 1 1990\n");
        assert_eq!(
            segs,
            vec![Segment::Skipped(SkipRecord {
                offset: 0,
                reason: SkipReason::OrphanSeparator
            })]
        );
    }

    #[test]
    fn test_whitespace_only_stream_is_empty_buffer() {
        let segs = segments("\n\n  \n");
        assert_eq!(segs.len(), 1);
        assert!(matches!(
            segs[0],
            Segment::Skipped(SkipRecord {
                reason: SkipReason::EmptyBuffer,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_separator_after_first_message_is_skipped() {
        let mut reader = Cursor::new(b"From: a\n\nbody\n".to_vec());
        let mut state = SegmenterState {
            parsed: 1,
            ..Default::default()
        };
        let segment = MboxSegmenter::new()
            .next_segment(&mut reader, &mut state)
            .unwrap();
        assert_eq!(
            segment,
            Segment::Skipped(SkipRecord {
                offset: 0,
                reason: SkipReason::MissingSeparator
            })
        );
        assert_eq!(state.offset, 14);
    }

    #[test]
    fn test_empty_stream_is_exhausted() {
        let mut reader = Cursor::new(Vec::new());
        let mut state = SegmenterState::default();
        let segment = MboxSegmenter::new()
            .next_segment(&mut reader, &mut state)
            .unwrap();
        assert_eq!(segment, Segment::Exhausted);
    }

    #[test]
    fn test_offset_resumes_on_boundary_line() {
        let text = "From a 1\nFrom: a\n\n\nFrom b 2\nFrom: b\n";
        let mut reader = Cursor::new(text.as_bytes().to_vec());
        let mut state = SegmenterState::default();
        let mut segmenter = MboxSegmenter::new();

        segmenter.next_segment(&mut reader, &mut state).unwrap();
        assert_eq!(state.offset, text.find("From b").unwrap() as u64);
        state.parsed = 1;

        match segmenter.next_segment(&mut reader, &mut state).unwrap() {
            Segment::Message(m) => assert_eq!(m.lines, vec!["From: b"]),
            other => panic!("unexpected segment: {other:?}"),
        }
        assert_eq!(state.offset, text.len() as u64);
        assert_eq!(
            segmenter.next_segment(&mut reader, &mut state).unwrap(),
            Segment::Exhausted
        );
    }

    #[test]
    fn test_trim_buffer() {
        let mut lines: Vec<String> = ["", "  ", "  From x", "body", "tail  ", "", " "]
            .iter()
            .map(|s| s.to_string())
            .collect();
        trim_buffer(&mut lines);
        assert_eq!(lines, vec!["From x", "body", "tail"]);
    }
}
