#![forbid(unsafe_code)]

//! Raw byte stream to key event decoder.
//!
//! [`decode`] looks at the front of a byte buffer and reports one of three
//! outcomes: a recognised key plus the number of bytes it used, some bytes
//! that were consumed without producing a key, or an incomplete sequence
//! that needs more input. It never consumes a partial escape sequence, so
//! callers can keep the undecoded tail and prepend it to the next read.
//! [`KeyDecoder`] does exactly that and queues the resulting keys.
//!
//! # Recognised input
//!
//! | Bytes | Key |
//! |-------|-----|
//! | `0x00..=0x7F` except ESC | [`KeyEvent::from_byte`] |
//! | `0x80..=0xFF` | dropped |
//! | `ESC [ <p1> ; <p2> A/B/C/D/F/H` | arrows, End, Home (p2 = 2 adds Shift; 5/6 add Ctrl on Left/Right) |
//! | `ESC [ P`, `ESC [ Z` | F1, Back-Tab |
//! | `ESC [ <n> ; <m> ~` | Home (1, 7), Delete (3), End (4, 8), F1 (11) |
//! | `ESC O A/B/C/D/H/P` | arrows, Home, F1 |
//! | `ESC P/X/^/_ ... ESC \` | dropped (DCS, SOS, PM, APC) |
//! | `ESC ] ... BEL` or `ESC ] ... ESC \` | dropped (OSC) |
//! | `ESC ESC <seq>` | sequence consumed, key suppressed |
//! | `ESC <other>` | two bytes dropped |
//!
//! Private parameter markers (`<`, `=`, `>`, `?`) and CSI intermediate bytes
//! are consumed but suppress the key.
//!
//! # DoS Protection
//!
//! A pending CSI longer than 256 bytes or a pending string sequence longer
//! than 4 KiB is discarded rather than buffered further.

use std::collections::VecDeque;

use crate::event::{KeyCode, KeyEvent, Modifiers};

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

/// DoS protection: maximum length of an unterminated CSI/SS3/escape prefix.
const MAX_CSI_LEN: usize = 256;

/// DoS protection: maximum length of an unterminated DCS/SOS/PM/APC/OSC string.
const MAX_STRING_LEN: usize = 4096;

/// Outcome of decoding the front of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A key was recognised using the first `consumed` bytes.
    Key { key: KeyEvent, consumed: usize },
    /// The first `consumed` bytes carry no key and should be dropped.
    Discarded { consumed: usize },
    /// The buffer ends inside a sequence. Nothing was consumed.
    Incomplete,
}

impl Decoded {
    /// Bytes consumed by this outcome.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        match self {
            Self::Key { consumed, .. } | Self::Discarded { consumed } => *consumed,
            Self::Incomplete => 0,
        }
    }

    /// The decoded key, if any.
    #[must_use]
    pub const fn key(&self) -> Option<KeyEvent> {
        match self {
            Self::Key { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Decode one key (or one ignorable unit) from the front of `buf`.
///
/// An empty buffer and a lone trailing ESC are both [`Decoded::Incomplete`];
/// [`KeyDecoder::feed`] decides when a lone ESC is the Escape key.
#[must_use]
pub fn decode(buf: &[u8]) -> Decoded {
    let Some(&first) = buf.first() else {
        return Decoded::Incomplete;
    };
    if first != ESC {
        return match KeyEvent::from_byte(first) {
            Some(key) => Decoded::Key { key, consumed: 1 },
            None => Decoded::Discarded { consumed: 1 },
        };
    }

    let mut i = 1;
    let mut suppress = false;
    if buf.get(i) == Some(&ESC) {
        // Meta prefix: decode what follows, but report nothing.
        suppress = true;
        i += 1;
    }
    while matches!(buf.get(i), Some(0x20..=0x2F)) {
        i += 1;
    }
    let Some(&introducer) = buf.get(i) else {
        return incomplete(buf.len(), MAX_CSI_LEN);
    };
    match introducer {
        b'P' | b'X' | b'^' | b'_' => skip_string(buf, i + 1, false),
        b']' => skip_string(buf, i + 1, true),
        b'O' => decode_ss3(buf, i + 1, suppress),
        b'[' => decode_csi(buf, i + 1, suppress),
        // A third ESC starts a new sequence; leave it in place.
        ESC => Decoded::Discarded { consumed: i },
        _ => Decoded::Discarded { consumed: i + 1 },
    }
}

fn incomplete(len: usize, cap: usize) -> Decoded {
    if len > cap {
        crate::warn!(len, cap, "discarding oversized escape sequence");
        Decoded::Discarded { consumed: len }
    } else {
        Decoded::Incomplete
    }
}

fn finish(key: Option<KeyEvent>, consumed: usize, suppress: bool) -> Decoded {
    match key {
        Some(key) if !suppress => Decoded::Key { key, consumed },
        _ => Decoded::Discarded { consumed },
    }
}

/// Skip a control string up to its String Terminator (or BEL for OSC).
fn skip_string(buf: &[u8], start: usize, bel_terminates: bool) -> Decoded {
    let mut j = start;
    while j < buf.len() {
        match buf[j] {
            BEL if bel_terminates => return Decoded::Discarded { consumed: j + 1 },
            ESC => match buf.get(j + 1) {
                Some(b'\\') => return Decoded::Discarded { consumed: j + 2 },
                Some(_) => j += 1,
                None => break,
            },
            _ => j += 1,
        }
    }
    incomplete(buf.len(), MAX_STRING_LEN)
}

fn decode_ss3(buf: &[u8], at: usize, suppress: bool) -> Decoded {
    let Some(&b) = buf.get(at) else {
        return Decoded::Incomplete;
    };
    let code = match b {
        b'A' => Some(KeyCode::Up),
        b'B' => Some(KeyCode::Down),
        b'C' => Some(KeyCode::Right),
        b'D' => Some(KeyCode::Left),
        b'H' => Some(KeyCode::Home),
        b'P' => Some(KeyCode::F(1)),
        _ => None,
    };
    finish(code.map(KeyEvent::new), at + 1, suppress)
}

fn decode_csi(buf: &[u8], start: usize, mut suppress: bool) -> Decoded {
    let mut j = start;
    let mut p1: u32 = 0;
    let mut p2: u32 = 0;
    loop {
        match buf.get(j) {
            Some(&d @ b'0'..=b'9') => {
                p2 = p2.saturating_mul(10).saturating_add(u32::from(d - b'0'));
            }
            Some(b':' | b';') => {
                p1 = p2;
                p2 = 0;
            }
            Some(b'<' | b'=' | b'>' | b'?') => suppress = true,
            _ => break,
        }
        j += 1;
    }
    while matches!(buf.get(j), Some(0x20..=0x2F)) {
        suppress = true;
        j += 1;
    }
    let Some(&final_byte) = buf.get(j) else {
        return incomplete(buf.len(), MAX_CSI_LEN);
    };
    if !(0x40..=0x7E).contains(&final_byte) {
        // Not a final byte: drop what we have and resynchronise on it.
        return Decoded::Discarded { consumed: j };
    }
    finish(csi_key(final_byte, p1, p2), j + 1, suppress)
}

/// Apply the xterm modifier parameter. 0 and 1 mean none, 2 is Shift,
/// 5 and 6 are Ctrl and Ctrl+Shift where `ctrl_allowed`.
fn with_modifier(code: KeyCode, modifier: u32, ctrl_allowed: bool) -> Option<KeyEvent> {
    let modifiers = match modifier {
        0 | 1 => Modifiers::NONE,
        2 => Modifiers::SHIFT,
        5 if ctrl_allowed => Modifiers::CTRL,
        6 if ctrl_allowed => Modifiers::CTRL | Modifiers::SHIFT,
        _ => return None,
    };
    Some(KeyEvent::new(code).with_modifiers(modifiers))
}

fn unmodified(code: KeyCode, modifier: u32) -> Option<KeyEvent> {
    matches!(modifier, 0 | 1).then(|| KeyEvent::new(code))
}

fn csi_key(final_byte: u8, p1: u32, p2: u32) -> Option<KeyEvent> {
    match final_byte {
        b'A' => with_modifier(KeyCode::Up, p2, false),
        b'B' => with_modifier(KeyCode::Down, p2, false),
        b'C' => with_modifier(KeyCode::Right, p2, true),
        b'D' => with_modifier(KeyCode::Left, p2, true),
        b'F' => with_modifier(KeyCode::End, p2, false),
        b'H' => with_modifier(KeyCode::Home, p2, false),
        b'P' => unmodified(KeyCode::F(1), p2),
        b'Z' => unmodified(KeyCode::BackTab, p2),
        b'~' => {
            let (key, modifier) = if p1 == 0 { (p2, 1) } else { (p1, p2) };
            match key {
                1 | 7 => with_modifier(KeyCode::Home, modifier, false),
                3 => unmodified(KeyCode::Delete, modifier),
                4 | 8 => with_modifier(KeyCode::End, modifier, false),
                11 => unmodified(KeyCode::F(1), modifier),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Incremental decoder holding undecoded bytes and decoded keys between reads.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
    keys: VecDeque<KeyEvent>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one read's worth of bytes and decode as much as possible.
    ///
    /// An incomplete sequence stays pending for the next call. The exception
    /// is a read that leaves a single ESC pending: terminals send whole
    /// escape sequences in a single write, so that is an Escape press. A
    /// pending meta prefix (`ESC ESC`) stays pending and never becomes a key.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        let mut start = 0;
        while start < self.pending.len() {
            match decode(&self.pending[start..]) {
                Decoded::Key { key, consumed } => {
                    self.keys.push_back(key);
                    start += consumed;
                }
                Decoded::Discarded { consumed } => start += consumed,
                Decoded::Incomplete => break,
            }
        }
        self.pending.drain(..start);
        if self.pending == [ESC] {
            self.keys.push_back(KeyEvent::new(KeyCode::Escape));
            self.pending.clear();
        }
    }

    /// Take the oldest decoded key.
    pub fn next_key(&mut self) -> Option<KeyEvent> {
        self.keys.pop_front()
    }

    /// Put a key back so the next [`next_key`](Self::next_key) returns it.
    pub fn unread(&mut self, key: KeyEvent) {
        self.keys.push_front(key);
    }

    /// Bytes retained from an incomplete sequence.
    #[must_use]
    pub fn pending_bytes(&self) -> &[u8] {
        &self.pending
    }

    /// Number of decoded keys waiting.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.keys.len()
    }

    /// Forget pending bytes and queued keys.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code).with_modifiers(Modifiers::SHIFT)
    }

    fn decoded_key(bytes: &[u8]) -> Option<KeyEvent> {
        match decode(bytes) {
            Decoded::Key { key, consumed } => {
                assert_eq!(consumed, bytes.len(), "sequence {bytes:?} not fully consumed");
                Some(key)
            }
            _ => None,
        }
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(decoded_key(b"a"), Some(key(KeyCode::Char('a'))));
        assert_eq!(decoded_key(b"~"), Some(key(KeyCode::Char('~'))));
        assert_eq!(decoded_key(&[0x05]), Some(KeyEvent::ctrl('e')));
    }

    #[test]
    fn high_bit_byte_is_discarded() {
        assert_eq!(decode(&[0xC3, b'a']), Decoded::Discarded { consumed: 1 });
    }

    #[test]
    fn csi_arrows() {
        assert_eq!(decoded_key(b"\x1b[A"), Some(key(KeyCode::Up)));
        assert_eq!(decoded_key(b"\x1b[B"), Some(key(KeyCode::Down)));
        assert_eq!(decoded_key(b"\x1b[C"), Some(key(KeyCode::Right)));
        assert_eq!(decoded_key(b"\x1b[D"), Some(key(KeyCode::Left)));
        assert_eq!(decoded_key(b"\x1b[1;2A"), Some(shift(KeyCode::Up)));
        assert_eq!(decoded_key(b"\x1b[1;2D"), Some(shift(KeyCode::Left)));
        assert_eq!(decoded_key(b"\x1b[1;1C"), Some(key(KeyCode::Right)));
    }

    #[test]
    fn csi_ctrl_horizontal_arrows() {
        assert_eq!(
            decoded_key(b"\x1b[1;5C"),
            Some(KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::CTRL))
        );
        assert_eq!(
            decoded_key(b"\x1b[1;6D"),
            Some(KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT))
        );
        // Ctrl is not decoded on vertical arrows.
        assert_eq!(decode(b"\x1b[1;5A"), Decoded::Discarded { consumed: 6 });
    }

    #[test]
    fn csi_home_end_variants() {
        assert_eq!(decoded_key(b"\x1b[H"), Some(key(KeyCode::Home)));
        assert_eq!(decoded_key(b"\x1b[F"), Some(key(KeyCode::End)));
        assert_eq!(decoded_key(b"\x1b[1;2H"), Some(shift(KeyCode::Home)));
        assert_eq!(decoded_key(b"\x1b[1;2F"), Some(shift(KeyCode::End)));
        assert_eq!(decoded_key(b"\x1b[1~"), Some(key(KeyCode::Home)));
        assert_eq!(decoded_key(b"\x1b[7~"), Some(key(KeyCode::Home)));
        assert_eq!(decoded_key(b"\x1b[4~"), Some(key(KeyCode::End)));
        assert_eq!(decoded_key(b"\x1b[8~"), Some(key(KeyCode::End)));
        assert_eq!(decoded_key(b"\x1b[1;2~"), Some(shift(KeyCode::Home)));
        assert_eq!(decoded_key(b"\x1b[4;2~"), Some(shift(KeyCode::End)));
    }

    #[test]
    fn csi_delete_f1_backtab() {
        assert_eq!(decoded_key(b"\x1b[3~"), Some(key(KeyCode::Delete)));
        assert_eq!(decoded_key(b"\x1b[11~"), Some(key(KeyCode::F(1))));
        assert_eq!(decoded_key(b"\x1b[P"), Some(key(KeyCode::F(1))));
        assert_eq!(decoded_key(b"\x1b[Z"), Some(key(KeyCode::BackTab)));
        // Shift-Delete is not a key we know.
        assert_eq!(decode(b"\x1b[3;2~"), Decoded::Discarded { consumed: 6 });
    }

    #[test]
    fn unknown_csi_final_is_discarded() {
        assert_eq!(decode(b"\x1b[5~"), Decoded::Discarded { consumed: 4 });
        assert_eq!(decode(b"\x1b[Qx"), Decoded::Discarded { consumed: 3 });
    }

    #[test]
    fn private_markers_suppress() {
        assert_eq!(decode(b"\x1b[?1A"), Decoded::Discarded { consumed: 5 });
        assert_eq!(decode(b"\x1b[>0;1C"), Decoded::Discarded { consumed: 7 });
    }

    #[test]
    fn csi_intermediates_suppress() {
        assert_eq!(decode(b"\x1b[1 A"), Decoded::Discarded { consumed: 5 });
    }

    #[test]
    fn ss3_keys() {
        assert_eq!(decoded_key(b"\x1bOA"), Some(key(KeyCode::Up)));
        assert_eq!(decoded_key(b"\x1bOH"), Some(key(KeyCode::Home)));
        assert_eq!(decoded_key(b"\x1bOP"), Some(key(KeyCode::F(1))));
        assert_eq!(decode(b"\x1bOQ"), Decoded::Discarded { consumed: 3 });
    }

    #[test]
    fn meta_prefix_suppresses_key() {
        assert_eq!(decode(b"\x1b\x1b[A"), Decoded::Discarded { consumed: 4 });
        assert_eq!(decode(b"\x1b\x1bOP"), Decoded::Discarded { consumed: 4 });
    }

    #[test]
    fn dcs_and_friends_skip_to_string_terminator() {
        assert_eq!(
            decode(b"\x1bPq#0;2;0;0;0\x1b\\x"),
            Decoded::Discarded { consumed: 15 }
        );
        assert_eq!(decode(b"\x1b_Gabc\x1b\\"), Decoded::Discarded { consumed: 8 });
        // An ESC inside the string that is not ST does not end it.
        assert_eq!(decode(b"\x1bXa\x1bbc\x1b\\"), Decoded::Discarded { consumed: 8 });
    }

    #[test]
    fn osc_ends_at_bel_or_st() {
        assert_eq!(decode(b"\x1b]0;title\x07a"), Decoded::Discarded { consumed: 10 });
        assert_eq!(decode(b"\x1b]0;title\x1b\\a"), Decoded::Discarded { consumed: 11 });
    }

    #[test]
    fn other_escape_consumes_two_bytes() {
        assert_eq!(decode(b"\x1bab"), Decoded::Discarded { consumed: 2 });
    }

    #[test]
    fn truncated_sequences_are_incomplete() {
        for partial in [
            &b"\x1b"[..],
            b"\x1b[",
            b"\x1b[1",
            b"\x1b[1;",
            b"\x1b[1;2",
            b"\x1bO",
            b"\x1b\x1b",
            b"\x1b\x1b[",
            b"\x1b]0;title",
            b"\x1bPabc\x1b",
        ] {
            assert_eq!(decode(partial), Decoded::Incomplete, "{partial:?}");
        }
    }

    #[test]
    fn oversized_csi_is_dropped() {
        let mut seq = b"\x1b[".to_vec();
        seq.extend(std::iter::repeat_n(b'1', MAX_CSI_LEN));
        assert_eq!(decode(&seq), Decoded::Discarded { consumed: seq.len() });
    }

    #[test]
    fn oversized_osc_is_dropped() {
        let mut seq = b"\x1b]".to_vec();
        seq.extend(std::iter::repeat_n(b'x', MAX_STRING_LEN));
        assert_eq!(decode(&seq), Decoded::Discarded { consumed: seq.len() });
    }

    #[test]
    fn decoder_retains_partial_sequence_across_feeds() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"\x1b[1;2");
        assert_eq!(decoder.next_key(), None);
        assert_eq!(decoder.pending_bytes(), b"\x1b[1;2");
        decoder.feed(b"A");
        assert_eq!(decoder.next_key(), Some(shift(KeyCode::Up)));
        assert!(decoder.pending_bytes().is_empty());
    }

    #[test]
    fn decoder_turns_trailing_lone_esc_into_escape() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"ab\x1b");
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Char('a'))));
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Char('b'))));
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Escape)));
        assert_eq!(decoder.next_key(), None);
    }

    #[test]
    fn decoder_keeps_trailing_meta_prefix_pending() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"ab\x1b\x1b");
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Char('a'))));
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Char('b'))));
        assert_eq!(decoder.next_key(), None);
        assert_eq!(decoder.pending_bytes(), b"\x1b\x1b");
    }

    #[test]
    fn decoder_three_escapes_leave_one_escape() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"\x1b\x1b\x1b");
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Escape)));
        assert_eq!(decoder.next_key(), None);
        assert!(decoder.pending_bytes().is_empty());
    }

    #[test]
    fn decoder_mixed_stream() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"x\x1b[3~\xffy\x1b]2;t\x07\x1b[Z");
        let keys: Vec<_> = std::iter::from_fn(|| decoder.next_key()).collect();
        assert_eq!(
            keys,
            vec![
                key(KeyCode::Char('x')),
                key(KeyCode::Delete),
                key(KeyCode::Char('y')),
                key(KeyCode::BackTab),
            ]
        );
    }

    #[test]
    fn unread_puts_key_first() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"b");
        decoder.unread(key(KeyCode::Char('a')));
        assert_eq!(decoder.queued(), 2);
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Char('a'))));
        assert_eq!(decoder.next_key(), Some(key(KeyCode::Char('b'))));
    }

    #[test]
    fn reset_clears_everything() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(b"a\x1b[1");
        decoder.reset();
        assert_eq!(decoder.queued(), 0);
        assert!(decoder.pending_bytes().is_empty());
    }
}
