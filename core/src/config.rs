//! Reader/writer configuration.
//!
//! Both configs deserialize from JSON with every field optional, e.g.
//! `{"format": "separator", "max_retained_capacity": 65536}`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_RETAINED_CAPACITY};
use crate::types::{Format, StreamError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Must match the format the stream was written with.
    pub format: Format,
    /// Capacity of a freshly (re)allocated payload buffer.
    pub initial_capacity: usize,
    /// Reusable buffers larger than this are dropped before the next read.
    pub max_retained_capacity: usize,
    /// Reject frames or long values declaring more bytes than this.
    /// `None` accepts any size.
    pub max_payload_len: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_retained_capacity: DEFAULT_MAX_RETAINED_CAPACITY,
            max_payload_len: None,
        }
    }
}

impl ReaderConfig {
    pub fn new(format: Format) -> Self {
        Self { format, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.max_retained_capacity < self.initial_capacity {
            return Err(StreamError::Config(format!(
                "max_retained_capacity ({}) must be >= initial_capacity ({})",
                self.max_retained_capacity, self.initial_capacity
            )));
        }
        Ok(())
    }

    pub fn from_json(s: &str) -> Result<Self, StreamError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| StreamError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub format: Format,
    /// Add a `\n` after size-prefixed payloads that do not end in one.
    pub pad_frames: bool,
    /// Flush the underlying stream after every write.
    pub flush_each_write: bool,
    /// Scratch buffers larger than this are dropped after the write.
    pub max_retained_capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            pad_frames: true,
            flush_each_write: false,
            max_retained_capacity: DEFAULT_MAX_RETAINED_CAPACITY,
        }
    }
}

impl WriterConfig {
    pub fn new(format: Format) -> Self {
        Self { format, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.max_retained_capacity == 0 {
            return Err(StreamError::Config("max_retained_capacity must be > 0".into()));
        }
        Ok(())
    }

    pub fn from_json(s: &str) -> Result<Self, StreamError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| StreamError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
