use crate::constants::{NAME_DELIMITER, NEWLINE};
use crate::stream::framing::types::FrameError;
use crate::utils::{decimal_len, fmt_snippet, put_decimal};

/// Length of the header line for a payload of `size` bytes named `name`.
pub fn frame_header_len(size: usize, name: &str) -> usize {
    let name_len = if name.is_empty() { 0 } else { 1 + name.len() };
    decimal_len(size) + name_len + 1
}

/// Append `<size>\n` or `<size> <name>\n` to `out`.
///
/// Layout:
///
/// ```text
/// [ size (decimal) ]
/// [ ' ' name ]        only when name is non-empty
/// [ '\n' ]
/// ```
pub fn encode_frame_header(size: usize, name: &str, out: &mut Vec<u8>) -> Result<usize, FrameError> {
    if name.as_bytes().contains(&NEWLINE) {
        return Err(FrameError::InvalidName {
            name: fmt_snippet(name.as_bytes()),
            reason: "names must not contain '\\n'",
        });
    }

    let start = out.len();
    put_decimal(out, size);
    if !name.is_empty() {
        out.push(NAME_DELIMITER);
        out.extend_from_slice(name.as_bytes());
    }
    out.push(NEWLINE);

    let written = out.len() - start;
    debug_assert_eq!(written, frame_header_len(size, name));
    Ok(written)
}

/// Whether a readability newline goes after `payload`.
#[inline]
pub fn needs_padding(payload: &[u8]) -> bool {
    !payload.is_empty() && payload.last() != Some(&NEWLINE)
}
