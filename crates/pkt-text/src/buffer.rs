#![forbid(unsafe_code)]

//! Edit buffer: a value with a cursor and a selection.
//!
//! The selection is the byte range `start..end`; `start == end` means no
//! selection. The cursor always sits on one end of the selection, which is
//! how shift-movement decides whether to grow or shrink it: if the cursor is
//! on the end, shift-left pulls the end back; otherwise it pushes the start
//! out.
//!
//! # Invariants
//!
//! - `start <= end <= value.len()`
//! - `cursor == start || cursor == end`
//! - `changed` never goes back to false once a mutation happened
//!
//! # Example
//! ```
//! use pkt_text::EditBuffer;
//!
//! let mut buf = EditBuffer::new("W6XYZ");
//! // The whole initial value is selected, so typing replaces it.
//! assert_eq!(buf.selection(), (0, 5));
//! buf.insert("K");
//! assert_eq!(buf.value(), "K");
//! assert!(buf.changed());
//! ```

use crate::words::{next_word, prev_word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    value: String,
    cursor: usize,
    start: usize,
    end: usize,
    changed: bool,
}

impl EditBuffer {
    /// Buffer with the whole value selected and the cursor at its end.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let len = value.len();
        Self {
            value,
            cursor: len,
            start: 0,
            end: len,
            changed: false,
        }
    }

    /// Buffer with the cursor at the end and nothing selected.
    #[must_use]
    pub fn collapsed(value: impl Into<String>) -> Self {
        let mut buf = Self::new(value);
        buf.start = buf.cursor;
        buf
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selection as `(start, end)`.
    #[inline]
    #[must_use]
    pub fn selection(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    #[inline]
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.start != self.end
    }

    /// Whether the entire non-empty value is selected with the cursor at the
    /// end, the state a field edit starts in.
    #[must_use]
    pub fn whole_value_selected(&self) -> bool {
        let len = self.value.len();
        self.cursor == len && self.cursor != 0 && self.end == len && self.start == 0
    }

    /// Whether the value was ever modified.
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Record a modification made outside the buffer (e.g. picking a choice).
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Replace the value, leaving the cursor at its end with no selection.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
        self.start = self.cursor;
        self.end = self.cursor;
        self.changed = true;
    }

    /// Replace the value and select `start..end` with the cursor on `cursor`.
    ///
    /// Out-of-range offsets are clamped.
    pub fn set_value_selected(&mut self, value: impl Into<String>, cursor: usize, start: usize, end: usize) {
        self.value = value.into();
        let len = self.value.len();
        self.end = end.min(len);
        self.start = start.min(self.end);
        self.cursor = if cursor <= self.start { self.start } else { self.end };
        self.changed = true;
    }

    fn collapse_to(&mut self, pos: usize) {
        self.cursor = pos;
        self.start = pos;
        self.end = pos;
    }

    // ── Movement ─────────────────────────────────────────────────────────

    /// Move one byte left; with `extend`, grow or shrink the selection.
    pub fn left(&mut self, extend: bool) {
        if !extend {
            let pos = self.cursor.saturating_sub(1);
            self.collapse_to(pos);
        } else if self.has_selection() && self.end == self.cursor {
            self.end -= 1;
            self.cursor -= 1;
        } else if self.cursor > 0 {
            self.start -= 1;
            self.cursor -= 1;
        }
    }

    /// Move one byte right; with `extend`, grow or shrink the selection.
    pub fn right(&mut self, extend: bool) {
        let len = self.value.len();
        if !extend {
            let pos = (self.cursor + 1).min(len);
            self.collapse_to(pos);
        } else if self.has_selection() && self.start == self.cursor {
            self.start += 1;
            self.cursor += 1;
        } else if self.cursor < len {
            self.end += 1;
            self.cursor += 1;
        }
    }

    /// Move to the start of the previous word.
    pub fn word_left(&mut self, extend: bool) {
        let pos = prev_word(&self.value, self.cursor);
        if !extend {
            self.collapse_to(pos);
        } else if self.has_selection() && self.end == self.cursor {
            self.cursor = pos;
            self.end = pos;
            self.start = self.start.min(pos);
        } else {
            self.cursor = pos;
            self.start = pos;
        }
    }

    /// Move to the end of the next word.
    pub fn word_right(&mut self, extend: bool) {
        let pos = next_word(&self.value, self.cursor);
        if !extend {
            self.collapse_to(pos);
        } else if self.has_selection() && self.start == self.cursor {
            self.cursor = pos;
            self.start = pos;
            self.end = self.end.max(pos);
        } else {
            self.cursor = pos;
            self.end = pos;
        }
    }

    /// Jump backwards to `pos` (line start, previous line, start of value).
    /// With `extend`, the selection start follows the cursor.
    pub fn jump_back(&mut self, pos: usize, extend: bool) {
        let pos = pos.min(self.cursor);
        if extend {
            self.cursor = pos;
            self.start = pos;
        } else {
            self.collapse_to(pos);
        }
    }

    /// Jump forwards to `pos` (line end, next line, end of value).
    /// With `extend`, the selection end follows the cursor.
    pub fn jump_forward(&mut self, pos: usize, extend: bool) {
        let pos = pos.clamp(self.cursor, self.value.len());
        if extend {
            self.cursor = pos;
            self.end = pos;
        } else {
            self.collapse_to(pos);
        }
    }

    // ── Editing ──────────────────────────────────────────────────────────

    /// Replace the selection (or insert at the cursor) with `text`.
    pub fn insert(&mut self, text: &str) {
        self.value.replace_range(self.start..self.end, text);
        let pos = self.start + text.len();
        self.collapse_to(pos);
        self.changed = true;
    }

    /// Backspace: delete the selection, or the byte before the cursor.
    pub fn backspace(&mut self) {
        if self.has_selection() {
            self.value.replace_range(self.start..self.end, "");
            self.changed = true;
            let pos = self.start;
            self.collapse_to(pos);
        } else if self.cursor > 0 {
            self.value.remove(self.cursor - 1);
            self.changed = true;
            let pos = self.cursor - 1;
            self.collapse_to(pos);
        }
    }

    /// Delete the byte under the cursor. The selection is dropped, not
    /// deleted.
    pub fn delete_forward(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
            self.changed = true;
        }
        let pos = self.cursor;
        self.collapse_to(pos);
    }

    /// Delete from the cursor up to `eol`.
    pub fn kill_to(&mut self, eol: usize) {
        let eol = eol.min(self.value.len());
        if self.cursor < eol {
            self.value.replace_range(self.cursor..eol, "");
            self.changed = true;
        }
        let pos = self.cursor;
        self.collapse_to(pos);
    }

    /// Delete from the cursor to the end of the value.
    pub fn kill_to_end(&mut self) {
        self.kill_to(self.value.len());
    }

    /// Empty the value.
    pub fn clear(&mut self) {
        if !self.value.is_empty() {
            self.value.clear();
            self.changed = true;
        }
        self.collapse_to(0);
    }

    /// The value split into (before, selected, after) as seen by a display
    /// line starting at `line_offset`.
    #[must_use]
    pub fn split_line<'a>(&self, line: &'a str, line_offset: usize) -> (&'a str, &'a str, &'a str) {
        split_on_select(line, line_offset, self.start, self.end)
    }
}

/// Split `line`, which starts at byte `line_offset` of the full value, into
/// the parts before, inside and after the selection `start..end`.
///
/// ```
/// use pkt_text::split_on_select;
///
/// assert_eq!(split_on_select("hello", 0, 1, 3), ("h", "el", "lo"));
/// assert_eq!(split_on_select("world", 6, 3, 8), ("", "wo", "rld"));
/// assert_eq!(split_on_select("world", 6, 2, 2), ("world", "", ""));
/// ```
#[must_use]
pub fn split_on_select(line: &str, line_offset: usize, start: usize, end: usize) -> (&str, &str, &str) {
    if start >= end {
        return (line, "", "");
    }
    let len = line.len();
    let s = start.saturating_sub(line_offset).min(len);
    let e = end.saturating_sub(line_offset).min(len);
    (&line[..s], &line[s..e], &line[e..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_invariants(buf: &EditBuffer) {
        let (start, end) = buf.selection();
        assert!(start <= end, "{buf:?}");
        assert!(end <= buf.len(), "{buf:?}");
        assert!(buf.cursor() == start || buf.cursor() == end, "{buf:?}");
    }

    #[test]
    fn new_selects_everything() {
        let buf = EditBuffer::new("abc");
        assert_eq!(buf.selection(), (0, 3));
        assert_eq!(buf.cursor(), 3);
        assert!(buf.whole_value_selected());
        assert!(!buf.changed());
    }

    #[test]
    fn empty_value_is_not_whole_selected() {
        assert!(!EditBuffer::new("").whole_value_selected());
    }

    #[test]
    fn collapsed_has_no_selection() {
        let buf = EditBuffer::collapsed("abc");
        assert_eq!(buf.selection(), (3, 3));
        assert!(!buf.has_selection());
    }

    #[test]
    fn shift_left_shrinks_selection_end() {
        let mut buf = EditBuffer::new("abcd");
        buf.left(true);
        assert_eq!(buf.selection(), (0, 3));
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn shift_left_without_selection_starts_one() {
        let mut buf = EditBuffer::collapsed("abcd");
        buf.left(true);
        buf.left(true);
        assert_eq!(buf.selection(), (2, 4));
        assert_eq!(buf.cursor(), 2);
        buf.right(true);
        assert_eq!(buf.selection(), (3, 4));
    }

    #[test]
    fn plain_movement_collapses() {
        let mut buf = EditBuffer::new("abcd");
        buf.left(false);
        assert_eq!(buf.selection(), (3, 3));
        buf.right(false);
        buf.right(false);
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn word_movement() {
        let mut buf = EditBuffer::collapsed("one two three");
        buf.word_left(false);
        assert_eq!(buf.cursor(), 8);
        buf.word_left(true);
        assert_eq!(buf.selection(), (4, 8));
        buf.word_right(true);
        assert_eq!(buf.selection(), (7, 8));
        assert_eq!(buf.cursor(), 7);
    }

    #[test]
    fn insert_replaces_selection() {
        let mut buf = EditBuffer::new("hello");
        buf.jump_back(0, false);
        buf.right(true);
        buf.right(true);
        buf.insert("J");
        assert_eq!(buf.value(), "Jllo");
        assert_eq!(buf.cursor(), 1);
        assert!(!buf.has_selection());
    }

    #[test]
    fn backspace_deletes_selection_first() {
        let mut buf = EditBuffer::new("hello");
        buf.backspace();
        assert_eq!(buf.value(), "");
        let mut buf = EditBuffer::collapsed("hello");
        buf.backspace();
        assert_eq!(buf.value(), "hell");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut buf = EditBuffer::collapsed("ab");
        buf.delete_forward();
        assert_eq!(buf.value(), "ab");
        assert!(!buf.changed());
        buf.jump_back(0, false);
        buf.delete_forward();
        assert_eq!(buf.value(), "b");
        assert!(buf.changed());
    }

    #[test]
    fn kill_and_clear() {
        let mut buf = EditBuffer::collapsed("abc def");
        buf.jump_back(3, false);
        buf.kill_to_end();
        assert_eq!(buf.value(), "abc");
        buf.clear();
        assert_eq!(buf.value(), "");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn jumps_extend_the_right_end() {
        let mut buf = EditBuffer::collapsed("abcdef");
        buf.jump_back(2, false);
        buf.jump_forward(6, true);
        assert_eq!(buf.selection(), (2, 6));
        let mut buf = EditBuffer::collapsed("abcdef");
        buf.jump_back(0, true);
        assert_eq!(buf.selection(), (0, 6));
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn changed_sticks_after_revert() {
        let mut buf = EditBuffer::collapsed("ab");
        buf.insert("c");
        buf.backspace();
        assert_eq!(buf.value(), "ab");
        assert!(buf.changed());
    }

    #[test]
    fn set_value_selected_clamps() {
        let mut buf = EditBuffer::new("");
        buf.set_value_selected("ALP", 2, 2, 9);
        assert_eq!(buf.selection(), (2, 3));
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn split_before_and_after_line() {
        assert_eq!(split_on_select("abc", 10, 0, 5), ("", "", "abc"));
        assert_eq!(split_on_select("abc", 0, 5, 9), ("abc", "", ""));
        assert_eq!(split_on_select("abc", 4, 0, 9), ("", "abc", ""));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Left(bool),
        Right(bool),
        WordLeft(bool),
        WordRight(bool),
        JumpBack(usize, bool),
        JumpForward(usize, bool),
        Insert(String),
        Backspace,
        Delete,
        Kill,
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Left),
            any::<bool>().prop_map(Op::Right),
            any::<bool>().prop_map(Op::WordLeft),
            any::<bool>().prop_map(Op::WordRight),
            (0usize..30, any::<bool>()).prop_map(|(p, e)| Op::JumpBack(p, e)),
            (0usize..30, any::<bool>()).prop_map(|(p, e)| Op::JumpForward(p, e)),
            "[a-z \n]{0,3}".prop_map(Op::Insert),
            Just(Op::Backspace),
            Just(Op::Delete),
            Just(Op::Kill),
            Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn selection_invariant_holds(initial in "[a-z \n]{0,20}", ops in prop::collection::vec(op(), 0..40)) {
            let mut buf = EditBuffer::new(initial);
            assert_invariants(&buf);
            for op in ops {
                match op {
                    Op::Left(e) => buf.left(e),
                    Op::Right(e) => buf.right(e),
                    Op::WordLeft(e) => buf.word_left(e),
                    Op::WordRight(e) => buf.word_right(e),
                    Op::JumpBack(p, e) => buf.jump_back(p, e),
                    Op::JumpForward(p, e) => buf.jump_forward(p, e),
                    Op::Insert(s) => buf.insert(&s),
                    Op::Backspace => buf.backspace(),
                    Op::Delete => buf.delete_forward(),
                    Op::Kill => buf.kill_to_end(),
                    Op::Clear => buf.clear(),
                }
                assert_invariants(&buf);
            }
        }

        #[test]
        fn split_reassembles(line in "[a-z]{0,12}", offset in 0usize..20, a in 0usize..40, b in 0usize..40) {
            let (start, end) = (a.min(b), a.max(b));
            let (pre, sel, post) = split_on_select(&line, offset, start, end);
            prop_assert_eq!(format!("{pre}{sel}{post}"), line);
        }
    }
}
