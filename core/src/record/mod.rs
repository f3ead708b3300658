//! Record data model and its byte-exact encoding.
//!
//! Responsibilities:
//! - Hold ordered key/value entries with reusable buffers
//! - Encode entries into the short-line / long-blob layout with exact sizing
//! - Decode that layout with strict validation
//!
//! Non-responsibilities:
//! - Framing records inside a stream
//! - IO

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    Entry,
    EntryHeader,
    Record,
    RecordError,
    ValueTag,
};

pub use encode::{encode_into, encode_record, encoded_len, entry_encoded_len};
pub use decode::{decode_record, decode_record_into, parse_entry_header};
