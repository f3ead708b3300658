use serde::{Deserialize, Serialize};

use crate::telemetry::counters::StreamCounters;

/// Immutable view of a stream's counters plus derived ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub records: u64,
    pub blobs: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
    pub padding_lines: u64,
    pub buffer_reallocs: u64,
    /// `bytes_overhead / total bytes`, 0 for an empty stream.
    pub overhead_ratio: f64,
    /// Mean payload bytes per record or blob.
    pub avg_payload_len: f64,
}

impl From<&StreamCounters> for TelemetrySnapshot {
    fn from(c: &StreamCounters) -> Self {
        let total = c.total_bytes();
        let overhead_ratio = if total > 0 {
            c.bytes_overhead as f64 / total as f64
        } else {
            0.0
        };

        let frames = c.records + c.blobs;
        let avg_payload_len = if frames > 0 {
            c.bytes_payload as f64 / frames as f64
        } else {
            0.0
        };

        Self {
            records: c.records,
            blobs: c.blobs,
            bytes_payload: c.bytes_payload,
            bytes_overhead: c.bytes_overhead,
            padding_lines: c.padding_lines,
            buffer_reallocs: c.buffer_reallocs,
            overhead_ratio,
            avg_payload_len,
        }
    }
}

impl TelemetrySnapshot {
    pub fn total_bytes(&self) -> u64 {
        self.bytes_payload + self.bytes_overhead
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
