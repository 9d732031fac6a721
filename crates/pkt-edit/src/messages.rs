#![forbid(unsafe_code)]

//! Error and status lines printed between edits.
//!
//! A status line is transient: it stays on the cursor row until the next
//! message, edit or [`Terminal::clear_status`] erases it.

use std::io::{self, Write};

use pkt_render::Color;
use pkt_text::wrap_text;

use crate::terminal::Terminal;

const ERROR_PREFIX: &str = "ERROR: ";
const USAGE_PREFIX: &str = "usage: ";

impl<R, W: Write> Terminal<R, W> {
    /// Print `message` as an error, word-wrapped to the terminal width.
    ///
    /// Messages are prefixed with `ERROR: ` and continuation lines are
    /// indented past the prefix; usage messages are printed as they are. On
    /// a non-interactive output the text goes to stderr instead.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        let (text, indent) = if message.starts_with(USAGE_PREFIX) {
            let indent = message.len() - message.trim_start_matches(' ').len();
            (message.to_owned(), indent)
        } else {
            (format!("{ERROR_PREFIX}{message}"), ERROR_PREFIX.len())
        };
        let wrapped = wrap_text(&text, self.width(), indent);
        if !self.info().output_is_term {
            return io::stderr().write_all(wrapped.as_bytes());
        }
        self.clear_status()?;
        let color = self.palette().error;
        self.print(color, &wrapped)?;
        self.painter_mut().set_color(Color::INHERIT)
    }

    /// Show a transient status line, replacing any previous one. An empty
    /// message just clears it. Nothing is printed on a non-interactive
    /// output.
    pub fn status(&mut self, message: &str) -> io::Result<()> {
        if !self.info().output_is_term {
            return Ok(());
        }
        self.clear_status()?;
        if !message.is_empty() {
            self.print(Color::INHERIT, message.trim_end_matches('\n'))?;
            self.set_status_shown(true);
        }
        Ok(())
    }

    /// Erase the status line, if one is showing.
    pub fn clear_status(&mut self) -> io::Result<()> {
        if !self.status_shown() {
            return Ok(());
        }
        let (_, y) = self.painter().position();
        self.move_to(0, y)?;
        self.clear_to_eol()?;
        self.set_status_shown(false);
        Ok(())
    }
}
