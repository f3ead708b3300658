//! record/types.rs
//! Record data model, value tags and record-level errors.
//!
//! Notes:
//! - A `Record` keeps its entry slots across `reset()` so decode loops
//!   refill existing key/value buffers instead of allocating per record.
//! - Only `entries[..len]` is live; slots past `len` are spare capacity.

use std::fmt;

use chrono::{DateTime, Utc};
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{KEY_DELIMITER, NEWLINE, SHORT_VALUE_MAX_LEN};
use crate::utils::{fmt_snippet, is_printable};

/// Tag byte following the `:` on a header line.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum ValueTag {
    /// `key: value\n`
    Short = 0x20, // ' '
    /// `key:+len\n` followed by `len` raw bytes
    Long = 0x2B, // '+'
}

impl ValueTag {
    /// Pick the representation for a value.
    ///
    /// Short only when the value is non-empty, at most
    /// [`SHORT_VALUE_MAX_LEN`] bytes, and entirely printable ASCII.
    #[inline]
    pub fn for_value(value: &[u8]) -> Self {
        if value.is_empty()
            || value.len() > SHORT_VALUE_MAX_LEN
            || !value.iter().all(|&b| is_printable(b))
        {
            ValueTag::Long
        } else {
            ValueTag::Short
        }
    }

    #[inline(always)]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Header line of one entry, borrowed from the line it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryHeader<'a> {
    Short { key: &'a [u8], value: &'a [u8] },
    Long { key: &'a [u8], len: usize },
}

/// One key/value pair. The value is opaque bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Vec<u8>,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Value as text, if it is valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    pub fn tag(&self) -> ValueTag {
        ValueTag::for_value(&self.value)
    }
}

/// Ordered key/value entries plus optional name and timestamp.
///
/// Duplicate keys are allowed; lookups return the first match.
#[derive(Default)]
pub struct Record {
    entries: Vec<Entry>,
    len: usize,
    /// Record tag (e.g. a log stream name). Empty means no name.
    /// Persisted only by size-prefix framing.
    pub name: String,
    /// Point in time attached by the caller. Kept in memory only.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `entries` pairs.
    pub fn with_capacity(entries: usize) -> Self {
        Self { entries: Vec::with_capacity(entries), ..Self::default() }
    }

    /// Append one pair.
    ///
    /// # Panics
    /// If `key` contains `:` or `\n`.
    pub fn push(&mut self, key: &str, value: impl AsRef<[u8]>) {
        if let Err(e) = self.try_push(key, value.as_ref()) {
            panic!("{e}");
        }
    }

    pub fn try_push(&mut self, key: &str, value: &[u8]) -> Result<(), RecordError> {
        validate_key(key)?;
        self.slot().fill(key, value);
        Ok(())
    }

    /// Append `key, value, key, value, ...`.
    ///
    /// # Panics
    /// If `args` is empty, has an odd length, or holds an invalid key.
    pub fn append(&mut self, args: &[&str]) {
        if let Err(e) = self.try_append(args) {
            panic!("{e}");
        }
    }

    /// Checked form of [`Record::append`]. Nothing is appended on error.
    pub fn try_append(&mut self, args: &[&str]) -> Result<(), RecordError> {
        if args.is_empty() || args.len() % 2 != 0 {
            return Err(RecordError::OddArguments { count: args.len() });
        }
        for pair in args.chunks_exact(2) {
            validate_key(pair[0])?;
        }
        for pair in args.chunks_exact(2) {
            self.slot().fill(pair[0], pair[1].as_bytes());
        }
        Ok(())
    }

    /// Decoder entry point: key comes straight from a header line, which
    /// already guarantees no `:` or `\n`.
    pub(crate) fn push_raw(&mut self, key: &[u8], value: &[u8]) -> Result<(), RecordError> {
        let key = std::str::from_utf8(key).map_err(|_| RecordError::InvalidKey {
            key: fmt_snippet(key),
            reason: "not valid UTF-8",
        })?;
        self.slot().fill(key, value);
        Ok(())
    }

    /// Next free slot, reusing a retained one when available.
    fn slot(&mut self) -> &mut Entry {
        if self.len == self.entries.len() {
            self.entries.push(Entry::default());
        }
        self.len += 1;
        &mut self.entries[self.len - 1]
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries().iter().find(|e| e.key == key).map(|e| e.value.as_slice())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries().iter().map(|e| (e.key.as_str(), e.value.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear entries, name and timestamp. Entry buffers stay allocated and
    /// are refilled by later pushes or decodes.
    pub fn reset(&mut self) {
        self.len = 0;
        self.name.clear();
        self.timestamp = None;
    }

    /// Heap bytes currently held, including spare slots.
    pub fn retained_capacity(&self) -> usize {
        let slots = self.entries.capacity() * std::mem::size_of::<Entry>();
        let buffers: usize = self
            .entries
            .iter()
            .map(|e| e.key.capacity() + e.value.capacity())
            .sum();
        slots + buffers + self.name.capacity()
    }
}

impl Entry {
    fn fill(&mut self, key: &str, value: &[u8]) {
        self.key.clear();
        self.key.push_str(key);
        self.value.clear();
        self.value.extend_from_slice(value);
    }
}

// Spare slots are an allocation detail: they are not cloned, compared or printed.
impl Clone for Record {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries().to_vec(),
            len: self.len,
            name: self.name.clone(),
            timestamp: self.timestamp,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
            && self.name == other.name
            && self.timestamp == other.timestamp
    }
}

impl Eq for Record {}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("timestamp", &self.timestamp)
            .field("entries", &self.entries())
            .finish()
    }
}

impl<'a> FromIterator<(&'a str, &'a [u8])> for Record {
    /// # Panics
    /// On an invalid key, like [`Record::push`].
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a [u8])>>(iter: I) -> Self {
        let mut rec = Record::new();
        for (k, v) in iter {
            rec.push(k, v);
        }
        rec
    }
}

fn validate_key(key: &str) -> Result<(), RecordError> {
    let reason = if key.as_bytes().contains(&KEY_DELIMITER) {
        "contains ':'"
    } else if key.as_bytes().contains(&NEWLINE) {
        "contains '\\n'"
    } else {
        return Ok(());
    };
    Err(RecordError::InvalidKey { key: fmt_snippet(key.as_bytes()), reason })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Header line not terminated by `\n`.
    #[error("missing '\\n' marking end of header in {line}")]
    MissingNewline { line: String },

    /// Header line has no `:` between key and tag.
    #[error("line in unrecognized format, missing ':': {line}")]
    MissingColon { line: String },

    /// Nothing follows the `:`.
    #[error("line in unrecognized format, missing value tag: {line}")]
    MissingTag { line: String },

    /// Tag is neither `' '` nor `'+'`.
    #[error("line in unrecognized format, unknown tag 0x{tag:02x}: {line}")]
    UnknownTag { tag: u8, line: String },

    /// Long-form length is not a non-negative decimal integer.
    #[error("invalid value length {raw}")]
    InvalidLength { raw: String },

    /// Fewer bytes remain than the long-form length declares.
    #[error("length of value {need} greater than remaining data of size {have}")]
    Truncated { need: usize, have: usize },

    #[error("invalid key {key}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Key/value arguments must come in whole, non-empty pairs.
    #[error("invalid number of args: {count}")]
    OddArguments { count: usize },
}
