use crate::constants::{DIAGNOSTIC_SNIPPET_LEN, MAX_DECIMAL_DIGITS, PRINTABLE_END, PRINTABLE_MIN};

/// Render bytes for diagnostics: printable ASCII as `b"..."`, anything else as hex.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| is_printable(c)) {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Like `fmt_bytes`, but cut to `DIAGNOSTIC_SNIPPET_LEN` bytes so a huge
/// malformed blob does not end up verbatim in an error message.
pub fn fmt_snippet(b: &[u8]) -> String {
    if b.len() <= DIAGNOSTIC_SNIPPET_LEN {
        return fmt_bytes(b);
    }
    format!("{}... ({} bytes)", fmt_bytes(&b[..DIAGNOSTIC_SNIPPET_LEN]), b.len())
}

#[inline(always)]
pub fn is_printable(b: u8) -> bool {
    (PRINTABLE_MIN..PRINTABLE_END).contains(&b)
}

/// Number of bytes in the decimal rendering of `n`.
#[inline]
pub fn decimal_len(mut n: usize) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

/// Append the decimal rendering of `n` without going through `String`.
pub fn put_decimal(out: &mut Vec<u8>, mut n: usize) {
    let mut digits = [0u8; MAX_DECIMAL_DIGITS];
    let mut i = MAX_DECIMAL_DIGITS;
    loop {
        i -= 1;
        digits[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out.extend_from_slice(&digits[i..]);
}

/// Strict decimal parse: non-empty, ASCII digits only, no sign, no overflow.
pub fn parse_decimal(raw: &[u8]) -> Option<usize> {
    if raw.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for &c in raw {
        if !c.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add((c - b'0') as usize)?;
    }
    Some(n)
}
