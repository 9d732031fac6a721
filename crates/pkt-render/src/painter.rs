#![forbid(unsafe_code)]

//! Painter: reconciles the terminal with a target [`Screen`].
//!
//! The painter remembers what it last put on the terminal (the *painted*
//! screen), where the terminal cursor is, and which color is active. Given a
//! freshly built target it emits only the bytes needed to make the terminal
//! match:
//!
//! - rows the target has and the painted screen lacks are created by moving
//!   to the last existing row and emitting a newline, which scrolls the
//!   terminal when the region sits at the bottom;
//! - each row is diffed with [`row_runs`], and each run is written as
//!   constant-color spans;
//! - painted rows beyond the target's height are blanked and dropped.
//!
//! # State Invariants
//!
//! - `(x, y)` always equals the physical cursor position relative to the
//!   region's top-left corner, so relative moves stay correct.
//! - `last_color` is the resolved color the terminal is using, or `None`
//!   when unknown. A color sequence is written only when the resolved
//!   (fg, bg) pair differs from it, and then only for the halves that changed.
//! - After [`Painter::paint`] returns, the painted screen equals the target.
//!
//! # Usage
//!
//! ```
//! use pkt_render::{Color, Painter, Screen};
//!
//! let mut painter = Painter::new(Vec::new());
//! let mut screen = Screen::new(30);
//! screen.write_at(0, 0, Color::new(51, 16), "Subject:");
//! painter.paint(&screen)?;
//! let first = painter.bytes_written();
//! painter.paint(&screen)?;
//! assert_eq!(painter.bytes_written(), first);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use pkt_core::config::Palette;
use smallvec::SmallVec;

use crate::ansi;
use crate::cell::{Cell, Color};
use crate::counting_writer::CountingWriter;
use crate::diff::row_runs;
use crate::screen::Screen;

/// Stateful diff renderer over a byte sink.
#[derive(Debug)]
pub struct Painter<W: Write> {
    out: CountingWriter<W>,
    painted: Option<Screen>,
    x: usize,
    y: usize,
    last_color: Option<Color>,
    cursor_hidden: bool,
    default_color: Color,
}

impl<W: Write> Painter<W> {
    /// Create a painter using the default palette's normal color for
    /// inherited halves.
    pub fn new(writer: W) -> Self {
        Self {
            out: CountingWriter::new(writer),
            painted: None,
            x: 0,
            y: 0,
            last_color: None,
            cursor_hidden: false,
            default_color: Palette::default().normal,
        }
    }

    /// Use `color` to fill in inherited halves.
    #[must_use]
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    #[must_use]
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Cursor position relative to the region origin.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// What the painter believes is on the terminal, if anything was painted
    /// since the last [`clean`](Self::clean) or [`reset`](Self::reset).
    #[must_use]
    pub fn painted(&self) -> Option<&Screen> {
        self.painted.as_ref()
    }

    /// Bytes emitted since creation or [`reset_counter`](Self::reset_counter).
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.out.bytes_written()
    }

    pub fn reset_counter(&mut self) {
        self.out.reset_counter();
    }

    pub fn get_ref(&self) -> &W {
        self.out.inner()
    }

    pub fn get_mut(&mut self) -> &mut W {
        self.out.inner_mut()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Make the terminal region match `target`.
    ///
    /// A target of a different width than the last paint erases the old
    /// region from its origin down before painting from scratch.
    pub fn paint(&mut self, target: &Screen) -> io::Result<()> {
        let mut painted = match self.painted.take() {
            Some(screen) if screen.width() == target.width() => screen,
            Some(_) => {
                self.move_to(0, 0)?;
                self.set_color(self.default_color)?;
                ansi::erase_to_eos(&mut self.out)?;
                Screen::new(target.width())
            }
            None => Screen::new(target.width()),
        };
        #[cfg(feature = "tracing")]
        let mut runs = 0usize;

        for y in 0..target.height() {
            let Some(row) = target.row(y) else { break };
            if y >= painted.height() {
                painted.ensure_row(y);
                self.move_to(0, y.saturating_sub(1))?;
                self.newline()?;
            }
            let old = painted.row(y).unwrap_or(&[]);
            for run in row_runs(y, old, row) {
                self.paint_cells(run.x0, run.x1 + 1, y, row)?;
                #[cfg(feature = "tracing")]
                {
                    runs += 1;
                }
            }
            painted.set_row(y, row);
        }

        let blank = vec![Cell::BLANK; painted.width()];
        while painted.height() > target.height() {
            let y = painted.height() - 1;
            let old = painted.row(y).unwrap_or(&[]);
            for run in row_runs(y, old, &blank) {
                self.paint_cells(run.x0, run.x1 + 1, y, &blank)?;
                #[cfg(feature = "tracing")]
                {
                    runs += 1;
                }
            }
            painted.truncate(y);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            rows = target.height(),
            runs,
            bytes = self.out.bytes_written(),
            "paint complete"
        );
        self.painted = Some(painted);
        Ok(())
    }

    /// Write `row[x0..x1]` at row `y`, one span per run of equal color.
    fn paint_cells(&mut self, x0: usize, x1: usize, y: usize, row: &[Cell]) -> io::Result<()> {
        let mut x = x0;
        while x < x1 {
            let color = row[x].color;
            let start = x;
            while x < x1 && row[x].color == color {
                x += 1;
            }
            self.move_to(start, y)?;
            self.set_color(color)?;
            let text: SmallVec<[u8; 80]> = row[start..x].iter().map(|c| c.ch).collect();
            self.out.write_all(&text)?;
            self.x += x - start;
        }
        Ok(())
    }

    /// Move the cursor with relative sequences only.
    pub fn move_to(&mut self, x: usize, y: usize) -> io::Result<()> {
        if y > self.y {
            ansi::cud(&mut self.out, y - self.y)?;
        } else if y < self.y {
            ansi::cuu(&mut self.out, self.y - y)?;
        }
        if x > self.x {
            ansi::cuf(&mut self.out, x - self.x)?;
        } else if x < self.x {
            ansi::cub(&mut self.out, self.x - x)?;
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Switch to `color`, emitting only the halves that changed.
    pub fn set_color(&mut self, color: Color) -> io::Result<()> {
        let color = color.or_default(self.default_color);
        let (fg, bg) = match self.last_color {
            Some(last) => (
                (last.fg() != color.fg()).then_some(color.fg()),
                (last.bg() != color.bg()).then_some(color.bg()),
            ),
            None => (Some(color.fg()), Some(color.bg())),
        };
        if fg.is_none() && bg.is_none() {
            return Ok(());
        }
        ansi::sgr_256(&mut self.out, fg, bg)?;
        self.last_color = Some(color);
        Ok(())
    }

    /// Write text outside the screen model. Each `\n` becomes CR LF.
    pub fn print(&mut self, color: Color, text: &str) -> io::Result<()> {
        self.set_color(color)?;
        let mut rest = text.as_bytes();
        while let Some(i) = memchr::memchr(b'\n', rest) {
            self.out.write_all(&rest[..i])?;
            self.newline()?;
            rest = &rest[i + 1..];
        }
        self.out.write_all(rest)?;
        self.x += rest.len();
        Ok(())
    }

    /// CR LF, moving to the start of the next row.
    pub fn newline(&mut self) -> io::Result<()> {
        ansi::crlf(&mut self.out)?;
        self.x = 0;
        self.y += 1;
        Ok(())
    }

    /// Erase from the cursor to the end of its row in the default color.
    pub fn clear_to_eol(&mut self) -> io::Result<()> {
        self.set_color(self.default_color)?;
        ansi::erase_to_eol(&mut self.out)
    }

    /// Show or hide the cursor; nothing is written if already in that state.
    pub fn show_cursor(&mut self, show: bool) -> io::Result<()> {
        if show != self.cursor_hidden {
            return Ok(());
        }
        if show {
            ansi::cursor_show(&mut self.out)?;
        } else {
            ansi::cursor_hide(&mut self.out)?;
        }
        self.cursor_hidden = !show;
        Ok(())
    }

    /// Return to column 0, erase everything from the cursor row down, show
    /// the cursor, and make the current row the new region origin.
    pub fn clean(&mut self) -> io::Result<()> {
        ansi::cr(&mut self.out)?;
        self.x = 0;
        self.set_color(self.default_color)?;
        ansi::erase_to_eos(&mut self.out)?;
        ansi::cursor_show(&mut self.out)?;
        self.x = 0;
        self.y = 0;
        self.cursor_hidden = false;
        self.painted = None;
        Ok(())
    }

    /// Forget all terminal state without writing anything.
    ///
    /// Used when the terminal leaves raw mode and may be changed by others.
    pub fn reset(&mut self) {
        self.painted = None;
        self.x = 0;
        self.y = 0;
        self.last_color = None;
        self.cursor_hidden = false;
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
