#![forbid(unsafe_code)]

//! Word wrapping for multi-line values, help text and messages.
//!
//! [`wrap`] splits a value into display lines and keeps, for each line, the
//! byte offset in the value where it starts. The offset table is what lets
//! the multi-line editor translate a cursor offset to a row and column and
//! back.
//!
//! # Algorithm
//!
//! For each `\n`-separated logical line, while it is wider than `width`:
//! break after the last space within the first `width` bytes (the space
//! stays on the upper line), or, if there is no space past the first byte,
//! hard-break at `width`.
//!
//! The offset table has one more entry than there are lines. Its last entry
//! is `value.len() + 1`, as if the value ended with a newline, so that the
//! end of the value maps to the end of the last line.
//!
//! ```
//! use pkt_text::wrap;
//!
//! let w = wrap("the quick brown fox", 10);
//! assert_eq!(w.lines(), &["the quick ", "brown fox"]);
//! assert_eq!(w.offsets(), &[0, 10, 20]);
//! assert_eq!(w.line_containing(12), 1);
//! ```

use smallvec::SmallVec;

/// Display lines of a wrapped value with their start offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped<'a> {
    lines: SmallVec<[&'a str; 8]>,
    offsets: SmallVec<[usize; 9]>,
}

impl<'a> Wrapped<'a> {
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    #[inline]
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of display lines (always at least one).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; even an empty value has one empty line.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Start offset of display line `line`.
    #[inline]
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.offsets[line.min(self.offsets.len() - 1)]
    }

    /// Index of the display line holding byte `offset`.
    #[must_use]
    pub fn line_containing(&self, offset: usize) -> usize {
        match self.offsets.iter().position(|&o| o > offset) {
            Some(i) => i.saturating_sub(1),
            None => self.offsets.len() - 2,
        }
    }

    /// (column, line) of byte `offset`.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_containing(offset);
        (offset - self.offsets[line], line)
    }

    /// Where the display line holding `offset` ends in `value`: before its
    /// newline if it has one, else at the next line's start.
    #[must_use]
    pub fn line_end(&self, offset: usize, value: &str) -> usize {
        let line = self.line_containing(offset);
        let mut end = self.offsets[line + 1].min(value.len());
        if end > 0 && value.as_bytes()[end - 1] == b'\n' {
            end -= 1;
        }
        end
    }

    /// Offset one display line below `offset`, keeping the column where the
    /// next line is long enough. On the last line, the end of the value.
    #[must_use]
    pub fn line_below(&self, offset: usize, value_len: usize) -> usize {
        let line = self.line_containing(offset);
        if line + 1 >= self.lines.len() {
            return value_len;
        }
        let target = offset + (self.offsets[line + 1] - self.offsets[line]);
        target.min(self.offsets[line + 2] - 1).min(value_len)
    }

    /// Offset one display line above `offset`, keeping the column where the
    /// previous line is long enough. On the first line, zero.
    #[must_use]
    pub fn line_above(&self, offset: usize) -> usize {
        let line = self.line_containing(offset);
        if line == 0 {
            return 0;
        }
        let target = offset - (self.offsets[line] - self.offsets[line - 1]);
        target.min(self.offsets[line] - 1)
    }
}

/// Wrap `value` to lines of at most `width` bytes.
///
/// A `width` of zero is treated as one.
#[must_use]
pub fn wrap(value: &str, width: usize) -> Wrapped<'_> {
    let width = width.max(1);
    let mut lines = SmallVec::new();
    let mut offsets = SmallVec::new();
    offsets.push(0);
    let mut offset = 0;
    for mut line in value.split('\n') {
        while line.len() > width {
            let cut = match memchr::memrchr(b' ', &line.as_bytes()[..width]) {
                Some(idx) if idx > 0 => idx + 1,
                _ => width,
            };
            lines.push(&line[..cut]);
            line = &line[cut..];
            offset += cut;
            offsets.push(offset);
        }
        lines.push(line);
        offset += line.len() + 1;
        offsets.push(offset);
    }
    Wrapped { lines, offsets }
}

/// Wrap `text` and return only the lines, with trailing newlines ignored.
#[must_use]
pub fn wrap_lines(text: &str, width: usize) -> Vec<&str> {
    wrap(text.trim_end_matches('\n'), width).lines().to_vec()
}

/// Wrap running text for display, indenting continuation lines by `indent`
/// spaces. Each output line, including the last, ends with `\n`.
///
/// Breaks drop the space they happen at, unlike [`wrap`], since the result
/// is never edited.
///
/// ```
/// use pkt_text::wrap_text;
///
/// let out = wrap_text("ERROR: the field value is not valid", 20, 7);
/// assert_eq!(out, "ERROR: the field\n       value is not\n       valid\n");
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize, indent: usize) -> String {
    let width = width.max(1);
    let indent = if indent >= width { 0 } else { indent };
    let pad = " ".repeat(indent);
    let mut out = String::with_capacity(text.len() + 16);
    for raw in text.trim_end_matches('\n').split('\n') {
        let mut line = raw.trim_end_matches(' ').to_owned();
        // Continuation lines must not break inside their own indent.
        let mut min_break = 0;
        while line.len() > width {
            let (head, rest) = match memchr::memrchr(b' ', &line.as_bytes()[..width]) {
                Some(idx) if idx > min_break => (&line[..idx], line[idx + 1..].trim_start_matches(' ')),
                _ => (&line[..width], &line[width..]),
            };
            out.push_str(head);
            out.push('\n');
            let next = format!("{pad}{rest}");
            line = next;
            min_break = indent;
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}
