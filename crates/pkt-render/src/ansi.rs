#![forbid(unsafe_code)]

//! ANSI escape sequence helpers.
//!
//! Pure byte generation with no state tracking; the [`Painter`] decides when
//! each sequence is needed. Only the subset the editor relies on is here, and
//! all cursor movement is relative because the editing region's absolute
//! position on screen is never known.
//!
//! | Sequence | Meaning |
//! |----------|---------|
//! | `ESC [ n A/B/C/D` | cursor up/down/forward/back |
//! | `ESC [ 38;5;n m` / `ESC [ 48;5;n m` | 256-color foreground/background |
//! | `ESC [ K` | erase to end of line |
//! | `ESC [ J` | erase to end of display |
//! | `ESC [ ? 25 h/l` | show/hide cursor |
//!
//! [`Painter`]: crate::painter::Painter

use std::io::{self, Write};

/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Erase from cursor to end of line: `CSI K`
pub const ERASE_TO_EOL: &[u8] = b"\x1b[K";

/// Erase from cursor to end of display: `CSI J`
pub const ERASE_TO_EOS: &[u8] = b"\x1b[J";

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

fn relative<W: Write>(w: &mut W, n: usize, dir: u8) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(&[0x1B, b'[', dir]),
        _ => write!(w, "\x1b[{n}{}", char::from(dir)),
    }
}

/// Move cursor up: `CSI n A`
pub fn cuu<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    relative(w, n, b'A')
}

/// Move cursor down: `CSI n B`
pub fn cud<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    relative(w, n, b'B')
}

/// Move cursor forward: `CSI n C`
pub fn cuf<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    relative(w, n, b'C')
}

/// Move cursor back: `CSI n D`
pub fn cub<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    relative(w, n, b'D')
}

/// Carriage return.
#[inline]
pub fn cr<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r")
}

/// Carriage return plus line feed; scrolls when on the bottom row.
#[inline]
pub fn crlf<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r\n")
}

/// Set 256-color foreground and/or background in a single SGR.
///
/// Writes nothing when both are `None`.
pub fn sgr_256<W: Write>(w: &mut W, fg: Option<u8>, bg: Option<u8>) -> io::Result<()> {
    match (fg, bg) {
        (None, None) => Ok(()),
        (Some(fg), None) => write!(w, "\x1b[38;5;{fg}m"),
        (None, Some(bg)) => write!(w, "\x1b[48;5;{bg}m"),
        (Some(fg), Some(bg)) => write!(w, "\x1b[38;5;{fg};48;5;{bg}m"),
    }
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

#[inline]
pub fn erase_to_eol<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ERASE_TO_EOL)
}

#[inline]
pub fn erase_to_eos<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ERASE_TO_EOS)
}
