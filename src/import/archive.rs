//! Archive orchestration: detect the format once, then pull messages through
//! segmentation, header parsing, timestamp normalization and the language
//! filter, and commit accepted records to a [`PostStore`].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ImportError, Result};
use crate::model::message::{MessageParts, ParsedMessage};
use crate::parser::date::TimestampNormalizer;
use crate::parser::detect::{detect_format, ArchiveFormat};
use crate::parser::language::LanguageFilter;
use crate::parser::mbox::MboxSegmenter;
use crate::parser::{anews, header, Segment, SegmenterState, SkipReason, SkipRecord};
use crate::store::{InsertOutcome, PostStore};
use crate::tables::SharedTables;

use super::groups::{parse_newsgroups, residual_groups};
use super::stats::ImportStats;

/// Default read buffer (128 KB).
pub const READ_BUFFER_SIZE: usize = 128 * 1024;

/// Label used for streams that do not come from a file.
const STREAM_LABEL: &str = "<stream>";

/// One step of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A complete record that passed every check.
    Message(ParsedMessage),
    /// A message discarded without stopping the stream.
    Skipped(SkipRecord),
}

/// Parses one archive stream.
///
/// Owns the stream and its [`SegmenterState`] until the stream is exhausted
/// or abandoned. Iterating yields [`ParseEvent`]s; [`Self::process_all`]
/// drives the whole stream into a store.
pub struct ArchiveParser<R> {
    reader: R,
    source: PathBuf,
    format: ArchiveFormat,
    length: u64,
    state: SegmenterState,
    mbox: MboxSegmenter,
    normalizer: TimestampNormalizer,
    filter: LanguageFilter,
    finished: bool,
}

impl ArchiveParser<BufReader<File>> {
    /// Open an archive file for parsing.
    pub fn open(path: impl AsRef<Path>, tables: &SharedTables) -> Result<Self> {
        Self::open_with_capacity(path, tables, READ_BUFFER_SIZE)
    }

    /// Open an archive file with a specific read buffer size.
    pub fn open_with_capacity(
        path: impl AsRef<Path>,
        tables: &SharedTables,
        capacity: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImportError::FileNotFound(path.to_path_buf())
            } else {
                ImportError::io(path, e)
            }
        })?;
        let reader = BufReader::with_capacity(capacity.max(1), file);
        let mut parser = Self::from_reader(reader, tables).map_err(|e| attach_path(e, path))?;
        parser.source = path.to_path_buf();
        info!(path = %path.display(), format = ?parser.format, "Processing archive");
        Ok(parser)
    }
}

impl<R: BufRead + Seek> ArchiveParser<R> {
    /// Wrap an already open stream and detect its format.
    pub fn from_reader(mut reader: R, tables: &SharedTables) -> Result<Self> {
        let length = reader.seek(SeekFrom::End(0))?;
        let format = detect_format(&mut reader)?;
        debug!(format = ?format, bytes = length, "Detected archive format");

        Ok(Self {
            reader,
            source: PathBuf::from(STREAM_LABEL),
            format,
            length,
            state: SegmenterState::default(),
            mbox: MboxSegmenter::new(),
            normalizer: TimestampNormalizer::new(tables.zones.clone()),
            filter: LanguageFilter::new(tables.dictionary.clone()),
            finished: false,
        })
    }

    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    pub fn state(&self) -> &SegmenterState {
        &self.state
    }

    /// Size of the stream in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Produce the next event, or `None` once the stream is done.
    ///
    /// A stream-fatal error ([`ImportError::is_stream_fatal`]) is returned once
    /// and then the parser reports exhaustion.
    pub fn next_event(&mut self) -> Result<Option<ParseEvent>> {
        if self.finished {
            return Ok(None);
        }
        let result = self.advance();
        if matches!(result, Ok(None) | Err(_)) {
            self.finished = true;
        }
        result
    }

    /// Parse the whole stream into `store`.
    ///
    /// Recoverable skips are collected in the returned stats. A stream-fatal
    /// condition ends the stream early but is not an error: messages already
    /// committed stand and [`ImportStats::aborted`] says why it stopped.
    pub fn process_all<S: PostStore + ?Sized>(
        &mut self,
        store: &mut S,
        progress: Option<&dyn Fn(u64, u64)>,
    ) -> Result<ImportStats> {
        let mut stats = ImportStats::new(self.format);
        stats.bytes = self.length;

        loop {
            let event = match self.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(e) if e.is_stream_fatal() => {
                    warn!(
                        path = %self.source.display(),
                        error = %e,
                        "Archive lacks usable headers, skipping rest of file"
                    );
                    stats.aborted = Some(e.to_string());
                    break;
                }
                Err(e) => return Err(attach_path(e, &self.source)),
            };

            match event {
                ParseEvent::Message(message) => self.commit(&message, store, &mut stats)?,
                ParseEvent::Skipped(skip) => stats.skips.push(skip),
            }

            if let Some(cb) = progress {
                cb(self.state.offset, self.length);
            }
        }

        stats.parsed = self.state.parsed;
        if let Some(cb) = progress {
            cb(self.length, self.length);
        }
        info!(
            path = %self.source.display(),
            parsed = stats.parsed,
            created = stats.created,
            duplicates = stats.duplicates,
            skipped = stats.skips.len(),
            "Finished archive"
        );
        self.close();
        Ok(stats)
    }

    /// Stop parsing and reset the cursor.
    pub fn close(&mut self) {
        self.state.reset();
        self.finished = true;
    }

    fn advance(&mut self) -> Result<Option<ParseEvent>> {
        let parts = match self.format {
            ArchiveFormat::Mbox => match self.mbox.next_segment(&mut self.reader, &mut self.state)? {
                Segment::Exhausted => return Ok(None),
                Segment::Skipped(skip) => return Ok(Some(ParseEvent::Skipped(skip))),
                Segment::Message(raw) => header::parse_header_block(raw)?,
            },
            ArchiveFormat::ANews => match anews::next_article(&mut self.reader, &mut self.state)? {
                None => return Ok(None),
                Some(parts) => parts,
            },
        };

        let offset = parts.offset;
        let message = match self.build_message(parts) {
            Ok(message) => message,
            Err(field) => {
                warn!(offset, field, "Missing header, skipping");
                return Ok(Some(skip(offset, SkipReason::MissingField(field))));
            }
        };

        if !self.filter.accepts(&message.body) {
            warn!(
                offset,
                message_id = %message.message_id,
                "Message is probably spam, skipping"
            );
            return Ok(Some(skip(offset, SkipReason::LanguageFilter)));
        }

        self.state.parsed += 1;
        debug!(
            offset,
            parsed = self.state.parsed,
            message_id = %message.message_id,
            "Parsed message"
        );
        Ok(Some(ParseEvent::Message(message)))
    }

    /// Extract the required fields. `Err` names the first missing header.
    fn build_message(&self, parts: MessageParts) -> std::result::Result<ParsedMessage, &'static str> {
        let headers = &parts.headers;
        let required = |name: &'static str| headers.get(name).ok_or(name);

        let message_id = required("message-id")?.trim().to_string();
        let sender = required("from")?.to_string();
        let date = required("date")?;
        let subject = required("subject")?.to_string();
        let newsgroups = parse_newsgroups(required("newsgroups")?);
        let timestamp = self.normalizer.normalize(date);

        Ok(ParsedMessage {
            message_id,
            sender,
            timestamp,
            subject,
            newsgroups,
            body: parts.body,
            raw_headers: parts.raw_headers,
        })
    }

    /// Insert a record; on a duplicate id only link the groups it lacks.
    fn commit<S: PostStore + ?Sized>(
        &mut self,
        message: &ParsedMessage,
        store: &mut S,
        stats: &mut ImportStats,
    ) -> Result<()> {
        let id = message.message_id.as_str();
        let existing = match store.insert_post(id, &message.sender, message.timestamp, &message.subject)? {
            InsertOutcome::Created => {
                store.insert_message_body(id, &message.body, &message.raw_headers)?;
                stats.created += 1;
                self.state.accepted += 1;
                BTreeSet::new()
            }
            InsertOutcome::Duplicate => {
                info!(message_id = id, "Found duplicate message, updating groups");
                stats.duplicates += 1;
                store.groups_for(id)?
            }
        };

        for group in residual_groups(&message.newsgroups, &existing) {
            store.link_group(id, group)?;
            stats.groups_linked += 1;
        }
        Ok(())
    }
}

impl<R: BufRead + Seek> Iterator for ArchiveParser<R> {
    type Item = Result<ParseEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

fn skip(offset: u64, reason: SkipReason) -> ParseEvent {
    ParseEvent::Skipped(SkipRecord { offset, reason })
}

/// Replace the placeholder path of stream-level I/O errors with the file path.
fn attach_path(err: ImportError, path: &Path) -> ImportError {
    match err {
        ImportError::Io { path: p, source } if p.as_os_str() == STREAM_LABEL => {
            ImportError::io(path, source)
        }
        other => other,
    }
}
