use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{record::RecordError, stream::framing::FrameError};

/// How whole records are delimited inside a continuous byte stream.
///
/// Fixed for the lifetime of a [`Reader`](crate::stream::Reader) or
/// [`Writer`](crate::stream::Writer). A reader configured with the wrong
/// format does not detect the mismatch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Every encoded record ends with a `---\n` line. Record names are not stored.
    Separator,
    /// Every record is preceded by a `<size> [<name>]\n` header line.
    #[default]
    SizePrefix,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Separator => "separator",
            Format::SizePrefix => "size_prefix",
        }
    }
}

/// Unified stream error covering I/O, record grammar, frame headers and config.
/// - `From<T>` impls let `?` cross layer boundaries.
/// - A clean end of stream is never one of these; readers return `Ok(false)`.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Failure reported by the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed record body.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Malformed or unwritable size-prefix frame header.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Stream ended in the middle of a record or frame.
    #[error("truncated stream at offset {offset}: {reason}")]
    Truncated { offset: u64, reason: String },

    /// Invalid reader/writer configuration.
    #[error("config error: {0}")]
    Config(String),
}
