#![forbid(unsafe_code)]

//! Screen cells.
//!
//! The engine is ASCII-only, so a cell is one byte of text plus a packed
//! [`Color`]. Bytes outside the printable range never reach a cell; the
//! screen model substitutes `?` for them.

pub use pkt_core::color::Color;

/// One character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Printable ASCII byte.
    pub ch: u8,
    /// Attribute; zero halves inherit the painter's default.
    pub color: Color,
}

impl Cell {
    /// A space in the inherited color.
    pub const BLANK: Self = Self {
        ch: b' ',
        color: Color::INHERIT,
    };

    /// Create a cell, replacing non-printable bytes with `?`.
    #[must_use]
    pub const fn new(ch: u8, color: Color) -> Self {
        let ch = if ch >= 0x20 && ch <= 0x7E { ch } else { b'?' };
        Self { ch, color }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_inherited_space() {
        assert_eq!(Cell::default(), Cell::BLANK);
        assert_eq!(Cell::BLANK.ch, b' ');
        assert_eq!(Cell::BLANK.color, Color::INHERIT);
    }

    #[test]
    fn non_printable_becomes_question_mark() {
        assert_eq!(Cell::new(b'\n', Color::INHERIT).ch, b'?');
        assert_eq!(Cell::new(0xE9, Color::INHERIT).ch, b'?');
        assert_eq!(Cell::new(b'~', Color::INHERIT).ch, b'~');
    }
}
