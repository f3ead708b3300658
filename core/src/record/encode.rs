//! record/encode.rs
//!
//! Record encoding.
//!
//! Wire layout per entry:
//!
//! ```text
//! short:  <key>: <value>\n
//! long:   <key>:+<len>\n<value>[\n]
//! ```
//!
//! The optional `\n` after a long value is omitted when the value itself
//! ends in `\n` or is empty. Separator framing appends a final `---\n`.

use crate::constants::{KEY_DELIMITER, NEWLINE, RECORD_SEPARATOR_LINE};
use crate::record::types::{Entry, Record, ValueTag};
use crate::types::Format;
use crate::utils::{decimal_len, put_decimal};

#[inline]
fn long_value_needs_newline(value: &[u8]) -> bool {
    !value.is_empty() && value.last() != Some(&NEWLINE)
}

/// Exact encoded size of a single entry.
pub fn entry_encoded_len(entry: &Entry) -> usize {
    let value = entry.value.as_slice();
    // key + ':' + tag
    let head = entry.key.len() + 2;
    match ValueTag::for_value(value) {
        ValueTag::Short => head + value.len() + 1,
        ValueTag::Long => {
            head + decimal_len(value.len())
                + 1
                + value.len()
                + long_value_needs_newline(value) as usize
        }
    }
}

/// Exact encoded size of `record` under `format`.
pub fn encoded_len(record: &Record, format: Format) -> usize {
    let body: usize = record.entries().iter().map(entry_encoded_len).sum();
    match format {
        Format::Separator => body + RECORD_SEPARATOR_LINE.len(),
        Format::SizePrefix => body,
    }
}

/// Append the encoding of `record` to `out` and return the number of bytes
/// appended. `out` grows at most once.
pub fn encode_into(record: &Record, format: Format, out: &mut Vec<u8>) -> usize {
    let expected = encoded_len(record, format);
    let start = out.len();
    out.reserve_exact(expected);

    for entry in record.entries() {
        let value = entry.value.as_slice();
        let tag = ValueTag::for_value(value);

        out.extend_from_slice(entry.key.as_bytes());
        out.push(KEY_DELIMITER);
        out.push(tag.as_byte());
        match tag {
            ValueTag::Short => {
                out.extend_from_slice(value);
                out.push(NEWLINE);
            }
            ValueTag::Long => {
                put_decimal(out, value.len());
                out.push(NEWLINE);
                out.extend_from_slice(value);
                if long_value_needs_newline(value) {
                    out.push(NEWLINE);
                }
            }
        }
    }

    if format == Format::Separator {
        out.extend_from_slice(RECORD_SEPARATOR_LINE);
    }

    let written = out.len() - start;
    debug_assert_eq!(written, expected, "encoded_len disagrees with encode_into");
    written
}

/// Encode `record` into a freshly allocated buffer of exactly the right size.
pub fn encode_record(record: &Record, format: Format) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(record, format));
    encode_into(record, format, &mut out);
    out
}

impl Record {
    /// Entries only, as carried inside a size-prefix frame.
    pub fn marshal(&self) -> Vec<u8> {
        encode_record(self, Format::SizePrefix)
    }

    /// Entries followed by the `---\n` separator line.
    pub fn marshal_with_separator(&self) -> Vec<u8> {
        encode_record(self, Format::Separator)
    }
}
