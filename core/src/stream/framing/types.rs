use thiserror::Error;

/// Parsed size-prefix frame header, borrowed from the header line.
///
/// Wire form: `<size>\n` or `<size> <name>\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader<'a> {
    /// Exact payload bytes following the header line.
    pub size: usize,
    /// Free-text name; empty when the header carries none.
    pub name: &'a str,
}

impl<'a> FrameHeader<'a> {
    pub fn new(size: usize, name: &'a str) -> Self {
        Self { size, name }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Byte accounting of one written or read frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSizes {
    /// Header line including its `\n`.
    pub header: usize,
    pub payload: usize,
    /// 0 or 1 readability newline after the payload.
    pub padding: usize,
}

impl FrameSizes {
    pub fn total(&self) -> usize {
        self.header + self.payload + self.padding
    }

    pub fn overhead(&self) -> usize {
        self.header + self.padding
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Size field is not a non-negative decimal integer.
    #[error("invalid frame size in header {line}")]
    InvalidSize { line: String },

    /// Name would break the header line, or is not UTF-8.
    #[error("invalid frame name {name}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Declared payload exceeds the configured limit.
    #[error("frame payload too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}
