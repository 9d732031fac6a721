#![forbid(unsafe_code)]

//! Word boundaries for Ctrl-Left / Ctrl-Right.
//!
//! A word is a run of bytes that are neither space nor newline. Both
//! functions first skip separators in the direction of travel, then the
//! word beyond them, so repeated calls hop from word edge to word edge.

#[inline]
fn is_separator(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

/// Start of the word before `cursor`.
///
/// Offsets past the end are clamped.
///
/// ```
/// use pkt_text::prev_word;
///
/// assert_eq!(prev_word("one two  three", 14), 9);
/// assert_eq!(prev_word("one two  three", 9), 4);
/// assert_eq!(prev_word("one two  three", 2), 0);
/// ```
#[must_use]
pub fn prev_word(s: &str, cursor: usize) -> usize {
    let bytes = s.as_bytes();
    let mut cur = cursor.min(bytes.len());
    while cur > 0 && is_separator(bytes[cur - 1]) {
        cur -= 1;
    }
    while cur > 0 && !is_separator(bytes[cur - 1]) {
        cur -= 1;
    }
    cur
}

/// End of the word at or after `cursor`.
///
/// ```
/// use pkt_text::next_word;
///
/// assert_eq!(next_word("one two\nthree", 0), 3);
/// assert_eq!(next_word("one two\nthree", 3), 7);
/// assert_eq!(next_word("one two\nthree", 7), 13);
/// ```
#[must_use]
pub fn next_word(s: &str, cursor: usize) -> usize {
    let bytes = s.as_bytes();
    let mut cur = cursor.min(bytes.len());
    while cur < bytes.len() && is_separator(bytes[cur]) {
        cur += 1;
    }
    while cur < bytes.len() && !is_separator(bytes[cur]) {
        cur += 1;
    }
    cur
}
