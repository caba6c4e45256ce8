//! Streaming access to recorded captures.
//!
//! A capture is a line-oriented file holding one compact JSON event per line.
//! The reader is a pull iterator over a non-restartable stream: the caller
//! asks for one event at a time, in capture order, until the file is
//! exhausted. Binary trace formats are out of scope; captures use this
//! encoding on both the read and the rewrite side.

use crate::event::TraceEvent;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or rewriting a capture
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open capture '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create capture '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error at line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: io::Error,
    },

    #[error("malformed event at line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write event: {0}")]
    Write(#[source] io::Error),

    #[error("failed to flush capture '{path}': {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Sequential reader over the events of one capture file
#[derive(Debug)]
pub struct CaptureReader {
    reader: BufReader<File>,
    line: u64,
    buf: String,
}

impl CaptureReader {
    /// Open a capture for streaming. Fails fast if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CaptureError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            reader: BufReader::new(file),
            line: 0,
            buf: String::new(),
        })
    }

    /// Pull the next event, or `None` once the capture is exhausted.
    ///
    /// Blank lines are skipped; any I/O or decode failure aborts the stream
    /// with the 1-based line number it occurred on.
    pub fn next_event(&mut self) -> Result<Option<TraceEvent>, CaptureError> {
        loop {
            self.buf.clear();
            self.line += 1;
            let bytes = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|source| CaptureError::Read {
                    line: self.line,
                    source,
                })?;
            if bytes == 0 {
                return Ok(None);
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let event = serde_json::from_str(text).map_err(|source| CaptureError::Malformed {
                line: self.line,
                source,
            })?;
            return Ok(Some(event));
        }
    }
}

/// Buffered writer producing a new capture in the same compact encoding.
///
/// Dropping the writer flushes whatever was buffered (errors ignored), so a
/// failed run still leaves the file in a closed, consistent state. The
/// success path calls [`CaptureWriter::finish`] to surface flush errors.
pub struct CaptureWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CaptureWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| CaptureError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Append one event, unchanged, as a single compact line.
    pub fn write_event(&mut self, event: &TraceEvent) -> Result<(), CaptureError> {
        serde_json::to_writer(&mut self.writer, event).map_err(CaptureError::Encode)?;
        self.writer.write_all(b"\n").map_err(CaptureError::Write)
    }

    pub fn finish(mut self) -> Result<(), CaptureError> {
        self.writer.flush().map_err(|source| CaptureError::Flush {
            path: self.path.clone(),
            source,
        })
    }
}
