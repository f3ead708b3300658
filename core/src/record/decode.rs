//! record/decode.rs
//!
//! Record decoding.
//!
//! Design notes:
//! - `parse_entry_header` is the single entry-line grammar; the stream
//!   reader uses it too when reading separator-framed records.
//! - The target record is reset before decoding and again on failure, so a
//!   failed decode never leaves partial entries behind.
//! - Malformed input is reported, never repaired.

use num_enum::TryFromPrimitive;

use crate::constants::{KEY_DELIMITER, NEWLINE, RECORD_SEPARATOR};
use crate::record::types::{EntryHeader, Record, RecordError, ValueTag};
use crate::utils::{fmt_snippet, parse_decimal};

/// Parse one header line (without its trailing `\n`).
///
/// `key:<tag><rest>` where tag `' '` makes `rest` the value and tag `'+'`
/// makes `rest` the decimal length of a value that follows the line.
pub fn parse_entry_header(line: &[u8]) -> Result<EntryHeader<'_>, RecordError> {
    let colon = line
        .iter()
        .position(|&b| b == KEY_DELIMITER)
        .ok_or_else(|| RecordError::MissingColon { line: fmt_snippet(line) })?;

    let key = &line[..colon];
    let (&tag, rest) = line[colon + 1..]
        .split_first()
        .ok_or_else(|| RecordError::MissingTag { line: fmt_snippet(line) })?;

    match ValueTag::try_from_primitive(tag) {
        Ok(ValueTag::Short) => Ok(EntryHeader::Short { key, value: rest }),
        Ok(ValueTag::Long) => {
            let len = parse_decimal(rest)
                .ok_or_else(|| RecordError::InvalidLength { raw: fmt_snippet(rest) })?;
            Ok(EntryHeader::Long { key, len })
        }
        Err(_) => Err(RecordError::UnknownTag { tag, line: fmt_snippet(line) }),
    }
}

/// Decode `data` into `record`, reusing its buffers.
///
/// Empty input yields an empty record, meaning no record was present.
/// A final `---` line (separator framing) ends decoding.
pub fn decode_record_into(data: &[u8], record: &mut Record) -> Result<(), RecordError> {
    record.reset();
    let res = decode_entries(data, record);
    if res.is_err() {
        record.reset();
    }
    res
}

/// Decode `data` into a newly allocated record.
pub fn decode_record(data: &[u8]) -> Result<Record, RecordError> {
    let mut record = Record::new();
    decode_record_into(data, &mut record)?;
    Ok(record)
}

fn decode_entries(mut d: &[u8], record: &mut Record) -> Result<(), RecordError> {
    while !d.is_empty() {
        let idx = d
            .iter()
            .position(|&b| b == NEWLINE)
            .ok_or_else(|| RecordError::MissingNewline { line: fmt_snippet(d) })?;
        let line = &d[..idx];
        d = &d[idx + 1..];

        if line == RECORD_SEPARATOR && d.is_empty() {
            break;
        }

        match parse_entry_header(line)? {
            EntryHeader::Short { key, value } => record.push_raw(key, value)?,
            EntryHeader::Long { key, len } => {
                if len > d.len() {
                    return Err(RecordError::Truncated { need: len, have: d.len() });
                }
                let (value, rest) = d.split_at(len);
                d = rest;
                // separator newline inserted by the encoder
                if d.first() == Some(&NEWLINE) {
                    d = &d[1..];
                }
                record.push_raw(key, value)?;
            }
        }
    }
    Ok(())
}

impl Record {
    /// Reset and decode `data` into this record.
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), RecordError> {
        decode_record_into(data, self)
    }
}
