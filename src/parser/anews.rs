//! A News article reader.
//!
//! An A News file holds exactly one article: five fixed lines (`A` + id,
//! newsgroups, sender path, date, subject) followed by the body.

use std::io::{BufRead, Seek, SeekFrom};

use tracing::warn;

use crate::error::{ImportError, Result};
use crate::model::headers::HeaderMap;
use crate::model::message::MessageParts;

use super::{read_line, SegmenterState};

/// Header names assigned to the fixed lines following the magic id line.
const FIXED_FIELDS: [&str; 4] = ["newsgroups", "from", "date", "subject"];

/// Read the article at `state.offset`, consuming the rest of the stream.
///
/// Returns `Ok(None)` once the stream is exhausted and
/// [`ImportError::MissingMagic`] if the first line does not start with `A`.
/// Fields missing because the file ends early are left out of the header map.
pub fn next_article<R: BufRead + Seek>(
    reader: &mut R,
    state: &mut SegmenterState,
) -> Result<Option<MessageParts>> {
    let start = state.offset;
    reader.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::new();

    let Some(first) = read_line(reader, &mut buf)? else {
        return Ok(None);
    };
    state.offset += first.len;

    let Some(message_id) = first.text.strip_prefix('A') else {
        warn!(offset = start, "Tried to parse as A News article, but lacks magic first byte");
        return Err(ImportError::MissingMagic { offset: start });
    };

    let mut headers = HeaderMap::new();
    headers.append("message-id", message_id);
    let mut raw_headers = format!("{}\n", first.text);

    for name in FIXED_FIELDS {
        let Some(line) = read_line(reader, &mut buf)? else {
            break;
        };
        state.offset += line.len;
        headers.append(name, &line.text);
        raw_headers.push_str(&line.text);
        raw_headers.push('\n');
    }

    let mut body = String::new();
    while let Some(line) = read_line(reader, &mut buf)? {
        state.offset += line.len;
        body.push_str(&line.text);
        body.push('\n');
    }
    let keep = body.trim_end().len();
    body.truncate(keep);

    Ok(Some(MessageParts {
        offset: start,
        headers,
        body,
        raw_headers,
    }))
}
