use crate::constants::{NAME_DELIMITER, NEWLINE};
use crate::stream::framing::types::{FrameError, FrameHeader};
use crate::utils::{fmt_snippet, parse_decimal};

/// Parse a size-prefix header line (without its trailing `\n`).
///
/// Splits on the first space: everything before is the size, everything
/// after is the name.
pub fn parse_frame_header(line: &[u8]) -> Result<FrameHeader<'_>, FrameError> {
    let (size, name) = match line.iter().position(|&b| b == NAME_DELIMITER) {
        Some(idx) => (&line[..idx], &line[idx + 1..]),
        None => (line, &line[line.len()..]),
    };

    let size = parse_decimal(size)
        .ok_or_else(|| FrameError::InvalidSize { line: fmt_snippet(line) })?;
    let name = std::str::from_utf8(name).map_err(|_| FrameError::InvalidName {
        name: fmt_snippet(name),
        reason: "not valid UTF-8",
    })?;

    Ok(FrameHeader { size, name })
}

/// A `\n`-only line: the writer's padding after a payload that did not end
/// in a newline.
#[inline]
pub fn is_padding_line(line: &[u8]) -> bool {
    line == [NEWLINE]
}
