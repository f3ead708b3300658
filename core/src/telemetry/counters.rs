//! telemetry/counters.rs
//! Mutable counters kept by a reader or writer.
//!
//! Converted into an immutable `TelemetrySnapshot` on demand.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected while reading or writing a stream
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub records: u64,
    pub blobs: u64,
    pub bytes_payload: u64,
    /// Frame headers, separator lines and padding.
    pub bytes_overhead: u64,
    pub padding_lines: u64,
    /// Scratch buffers dropped for exceeding the retained-capacity ceiling.
    pub buffer_reallocs: u64,
}

impl StreamCounters {
    /// Record one encoded record.
    /// - `payload_len`: encoded entries
    /// - `overhead_len`: frame header or separator line
    pub fn add_record(&mut self, payload_len: usize, overhead_len: usize) {
        self.records += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += overhead_len as u64;
    }

    /// Record one raw blob frame.
    pub fn add_blob(&mut self, payload_len: usize, overhead_len: usize) {
        self.blobs += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += overhead_len as u64;
    }

    /// Padding newline written or skipped.
    pub fn add_padding(&mut self) {
        self.padding_lines += 1;
        self.bytes_overhead += 1;
    }

    pub fn add_realloc(&mut self) {
        self.buffer_reallocs += 1;
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes_payload + self.bytes_overhead
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.records += other.records;
        self.blobs += other.blobs;
        self.bytes_payload += other.bytes_payload;
        self.bytes_overhead += other.bytes_overhead;
        self.padding_lines += other.padding_lines;
        self.buffer_reallocs += other.buffer_reallocs;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
