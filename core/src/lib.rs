//! kvlog-core
//!
//! Human-readable key/value records and offset-indexable record streams.
//! Pure Rust, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Data model and encoding
pub mod record;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{ReaderConfig, WriterConfig};
    pub use crate::record::{decode_record, encode_record, encoded_len, Entry, Record, RecordError};
    pub use crate::stream::{
        open_reader,
        open_reader_at,
        open_writer,
        InputSource,
        OutputSink,
        Reader,
        Writer,
    };
    pub use crate::telemetry::{StreamCounters, TelemetrySnapshot};
    pub use crate::types::{Format, StreamError};
}
