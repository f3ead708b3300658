/// Longest value (in bytes) that may still use the single-line `key: value` form.
pub const SHORT_VALUE_MAX_LEN: usize = 120;

/// Printable ASCII range accepted in a short value: `[32, 127)`.
pub const PRINTABLE_MIN: u8 = 32;
pub const PRINTABLE_END: u8 = 127;

/// Line that terminates a record in separator framing (without its `\n`).
pub const RECORD_SEPARATOR: &[u8] = b"---";
/// Separator line including the trailing newline, as it appears on the wire.
pub const RECORD_SEPARATOR_LINE: &[u8] = b"---\n";

/// Byte splitting the key from the tag on a header line.
pub const KEY_DELIMITER: u8 = b':';
/// Byte splitting the size from the name on a size-prefix frame header.
pub const NAME_DELIMITER: u8 = b' ';
pub const NEWLINE: u8 = b'\n';

/// Defaults for reader/writer scratch buffers
pub const DEFAULT_INITIAL_CAPACITY: usize = 4 * 1024; // 4 KiB
/// Buffers grown beyond this are dropped before the next read or write.
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 1024 * 1024; // 1 MiB

/// `usize::MAX` renders as 20 decimal digits.
pub const MAX_DECIMAL_DIGITS: usize = 20;

/// Offending input quoted in error messages is cut at this many bytes.
pub const DIAGNOSTIC_SNIPPET_LEN: usize = 64;
