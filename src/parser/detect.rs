//! Archive format detection.

use std::io::{BufRead, Seek, SeekFrom};

use serde::Serialize;

/// The two archive encodings this parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    /// One post per file, five fixed header lines, first line starts with `A`.
    ANews,
    /// One or more posts introduced by `From ` separator lines.
    Mbox,
}

/// Inspect the first line of the stream and pick a format.
///
/// The stream is rewound to its start afterwards. An empty stream is
/// treated as an (empty) mbox archive.
pub fn detect_format<R: BufRead + Seek>(reader: &mut R) -> std::io::Result<ArchiveFormat> {
    reader.seek(SeekFrom::Start(0))?;
    let mut first = Vec::new();
    reader.read_until(b'\n', &mut first)?;
    reader.seek(SeekFrom::Start(0))?;

    if first.first() == Some(&b'A') {
        Ok(ArchiveFormat::ANews)
    } else {
        Ok(ArchiveFormat::Mbox)
    }
}
