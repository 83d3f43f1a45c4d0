//! Name character classification
//!
//! A fixed 128-entry membership table for the ASCII bytes that may appear
//! in an element, attribute, or processing-instruction name. The colon is
//! deliberately absent: it is only legal as the single prefix separator,
//! which the scanners handle on their own.

/// ASCII name-character membership: `-`, `.`, digits, letters, `_`.
pub const NAME_CHARS: [bool; 128] = build_name_chars();

const fn build_name_chars() -> [bool; 128] {
    let mut table = [false; 128];
    let mut b = 0;
    while b < 128 {
        let c = b as u8;
        table[b] = matches!(c, b'-' | b'.' | b'0'..=b'9' | b'A'..=b'Z' | b'_' | b'a'..=b'z');
        b += 1;
    }
    table
}

/// Check if byte may continue a name
///
/// Non-ASCII bytes are accepted so UTF-8 encoded names pass through intact.
#[inline]
pub fn is_name_byte(b: u8) -> bool {
    match NAME_CHARS.get(b as usize) {
        Some(&member) => member,
        None => true,
    }
}

/// XML whitespace (space, tab, newline, carriage return)
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Length of the run of name bytes at the start of `input`
#[inline]
pub fn name_len(input: &[u8]) -> usize {
    input.iter().position(|&b| !is_name_byte(b)).unwrap_or(input.len())
}

/// Length of the run of whitespace at the start of `input`
#[inline]
pub fn space_len(input: &[u8]) -> usize {
    input.iter().position(|&b| !is_space(b)).unwrap_or(input.len())
}
