#![forbid(unsafe_code)]

//! In-memory picture of the bottom-anchored editing region.
//!
//! A [`Screen`] is a list of rows, each exactly `width` cells wide. Row 0 is
//! the row the terminal cursor sat on when the region was opened; further
//! rows appear below it as they are written to. Writing never shrinks the
//! model; [`Screen::truncate`] is the only way to drop rows.
//!
//! The screen remembers where its last write ended, so [`Screen::write`] can
//! append text in a different color without repeating coordinates:
//!
//! ```
//! use pkt_render::{Color, Screen};
//!
//! let mut screen = Screen::new(20);
//! screen.write_at(0, 0, Color::new(51, 0), "To:");
//! screen.write(Color::INHERIT, " W6XYZ");
//! assert_eq!(screen.row_text(0).trim_end(), "To: W6XYZ");
//! ```

use crate::cell::{Cell, Color};

/// Grid of cells, grown on demand.
///
/// Equality compares contents only, not the write position.
#[derive(Debug, Clone)]
pub struct Screen {
    width: usize,
    rows: Vec<Vec<Cell>>,
    /// Where the last write ended: (x, y).
    cursor: (usize, usize),
}

impl Screen {
    /// A region of the given width holding one blank row.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::BLANK; width]],
            cursor: (0, 0),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows currently in the model.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Position just past the last write.
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Make sure rows `0..=y` exist.
    pub fn ensure_row(&mut self, y: usize) {
        while self.rows.len() <= y {
            self.rows.push(vec![Cell::BLANK; self.width]);
        }
    }

    /// Overwrite cells starting at (x, y), clipping at the row's end.
    pub fn write_at(&mut self, x: usize, y: usize, color: Color, text: &str) {
        self.ensure_row(y);
        let x = x.min(self.width);
        let row = &mut self.rows[y];
        let room = row.len() - x;
        let bytes = &text.as_bytes()[..text.len().min(room)];
        for (cell, &b) in row[x..].iter_mut().zip(bytes) {
            *cell = Cell::new(b, color);
        }
        self.cursor = (x + bytes.len(), y);
    }

    /// Continue writing where the previous write ended.
    pub fn write(&mut self, color: Color, text: &str) {
        let (x, y) = self.cursor;
        self.write_at(x, y, color, text);
    }

    /// Write `count` blank cells in `color` starting at (x, y).
    pub fn fill(&mut self, x: usize, count: usize, y: usize, color: Color) {
        self.ensure_row(y);
        let x = x.min(self.width);
        let end = x.saturating_add(count).min(self.width);
        for cell in &mut self.rows[y][x..end] {
            *cell = Cell::new(b' ', color);
        }
        self.cursor = (end, y);
    }

    /// Replace row `y` with `cells`, which must be exactly `width` long.
    pub(crate) fn set_row(&mut self, y: usize, cells: &[Cell]) {
        self.ensure_row(y);
        self.rows[y].copy_from_slice(cells);
    }

    /// Keep only the first `height` rows (at least one).
    pub fn truncate(&mut self, height: usize) {
        self.rows.truncate(height.max(1));
        if self.cursor.1 >= self.rows.len() {
            self.cursor = (0, 0);
        }
    }

    /// Text of row `y` (empty if the row does not exist).
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.iter().map(|c| char::from(c.ch)).collect())
            .unwrap_or_default()
    }
}

impl PartialEq for Screen {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.rows == other.rows
    }
}

impl Eq for Screen {}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: Color = Color::new(51, 16);
    const ENTRY: Color = Color::new(231, 238);

    #[test]
    fn new_has_one_blank_row() {
        let screen = Screen::new(10);
        assert_eq!(screen.height(), 1);
        assert_eq!(screen.width(), 10);
        assert!(screen.row(0).unwrap().iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn write_at_clips_to_row_width() {
        let mut screen = Screen::new(5);
        screen.write_at(3, 0, LABEL, "abcdef");
        assert_eq!(screen.row_text(0), "   ab");
        assert_eq!(screen.cursor(), (5, 0));
        assert_eq!(screen.cell(4, 0), Some(Cell::new(b'b', LABEL)));
    }

    #[test]
    fn write_past_width_is_ignored() {
        let mut screen = Screen::new(5);
        screen.write_at(9, 0, LABEL, "x");
        assert_eq!(screen.row_text(0), "     ");
    }

    #[test]
    fn write_continues_from_last_position() {
        let mut screen = Screen::new(12);
        screen.write_at(2, 0, LABEL, "ab");
        screen.write(ENTRY, "cd");
        assert_eq!(screen.row_text(0), "  abcd      ");
        assert_eq!(screen.cell(4, 0).unwrap().color, ENTRY);
        assert_eq!(screen.cell(3, 0).unwrap().color, LABEL);
    }

    #[test]
    fn rows_grow_on_demand() {
        let mut screen = Screen::new(4);
        screen.write_at(1, 2, ENTRY, "x");
        assert_eq!(screen.height(), 3);
        assert_eq!(screen.row_text(1), "    ");
        assert_eq!(screen.row_text(2), " x  ");
    }

    #[test]
    fn fill_paints_blanks() {
        let mut screen = Screen::new(8);
        screen.fill(2, 4, 0, ENTRY);
        let colors: Vec<_> = screen.row(0).unwrap().iter().map(|c| c.color).collect();
        assert_eq!(colors[1], Color::INHERIT);
        assert!(colors[2..6].iter().all(|&c| c == ENTRY));
        assert_eq!(colors[6], Color::INHERIT);
        screen.fill(6, 10, 0, ENTRY);
        assert_eq!(screen.cursor(), (8, 0));
    }

    #[test]
    fn truncate_keeps_at_least_one_row() {
        let mut screen = Screen::new(4);
        screen.ensure_row(3);
        screen.truncate(0);
        assert_eq!(screen.height(), 1);
    }
}
