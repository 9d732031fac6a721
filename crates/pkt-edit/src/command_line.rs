#![forbid(unsafe_code)]

//! Command-line reader with history.
//!
//! The command line is a single row: the prompt, then the line being typed,
//! scrolled horizontally so the cursor stays visible. Enter always ends the
//! line. Up and Down walk the history; the line being typed is kept in the
//! newest history slot while older entries are shown, so coming back down
//! restores it.

use std::io::{Read, Write};

use pkt_render::{Color, Screen};
use pkt_text::EditBuffer;

use crate::editor::read_edit_key;
use crate::error::{EditError, EditOutcome};
use crate::keys::{EditKey, edit_common};
use crate::terminal::Terminal;

/// Lines entered so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Append an entry.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    fn drop_last(&mut self) {
        self.entries.pop();
    }

    fn set(&mut self, index: usize, line: &str) {
        if let Some(entry) = self.entries.get_mut(index) {
            line.clone_into(entry);
        }
    }
}

/// Reads command lines, one per [`read_command`](Self::read_command) call.
///
/// ```
/// use pkt_edit::{CommandLineReader, Terminal};
///
/// let mut term = Terminal::headless(b"list\r".to_vec(), 80);
/// let mut reader = CommandLineReader::new();
/// assert_eq!(reader.read_command(&mut term)?, "list");
/// assert_eq!(reader.history().get(0), Some("list"));
/// # Ok::<(), pkt_edit::EditError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineReader {
    history: History,
}

impl CommandLineReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history.
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self { history }
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Read one command line.
    ///
    /// Without an interactive input the prompt is printed and one cooked
    /// line is read.
    ///
    /// # Errors
    ///
    /// [`EditError::InputClosed`] at end of input, [`EditError::Interrupted`]
    /// on Ctrl-C, [`EditError::Io`] on terminal failure.
    pub fn read_command<R: Read, W: Write>(&mut self, term: &mut Terminal<R, W>) -> EditOutcome<String> {
        if !term.info().input_is_term {
            let prompt = format!("{} ", term.config().prompt);
            term.print(Color::INHERIT, &prompt)?;
            return term.read_line()?.ok_or(EditError::InputClosed);
        }

        let mut scope = term.raw_scope()?;
        let term = &mut *scope;
        term.clean()?;
        let result = self.edit_line(term);
        if result.is_err() {
            // The in-progress slot never became a line.
            self.history.drop_last();
        }
        let closed = term.close_region();
        let line = result?;
        closed?;
        pkt_core::debug!(len = line.len(), history = self.history.len(), "command read");
        Ok(line)
    }

    fn edit_line<R: Read, W: Write>(&mut self, term: &mut Terminal<R, W>) -> EditOutcome<String> {
        let palette = term.palette();
        let prompt = term.config().prompt.clone();
        let text_x = prompt.len() + 1;
        let visible = term.width().saturating_sub(text_x + 1);
        let mut buffer = EditBuffer::collapsed(String::new());
        let mut scroll = 0usize;
        self.history.push(String::new());
        let newest = self.history.len() - 1;
        let mut index = newest;

        loop {
            let mut screen = Screen::new(term.region_width());
            screen.write_at(0, 0, palette.label, &prompt);
            let (start, end) = buffer.selection();
            let shown = &buffer.value()[scroll..];
            let (pre, sel, post) = pkt_text::split_on_select(shown, scroll, start, end);
            screen.write_at(text_x, 0, Color::INHERIT, pre);
            screen.write(palette.selected, sel);
            screen.write(Color::INHERIT, post);
            term.paint(&screen)?;
            term.move_to(text_x + buffer.cursor() - scroll, 0)?;

            match EditKey::from_key(read_edit_key(term)?) {
                EditKey::Home(extend) => buffer.jump_back(0, extend),
                EditKey::End(extend) => {
                    let len = buffer.len();
                    buffer.jump_forward(len, extend);
                }
                EditKey::KillLine => buffer.kill_to_end(),
                EditKey::Enter => {
                    self.history.set(newest, buffer.value());
                    term.move_to(text_x, 0)?;
                    term.clear_to_eol()?;
                    term.print(Color::INHERIT, buffer.value())?;
                    term.print(Color::INHERIT, "\n")?;
                    term.clean()?;
                    return Ok(buffer.into_value());
                }
                EditKey::Down(_) => {
                    if index < newest {
                        index += 1;
                        buffer = EditBuffer::collapsed(self.history.get(index).unwrap_or_default());
                    }
                }
                EditKey::Up(_) => {
                    if index > 0 {
                        if index == newest {
                            self.history.set(newest, buffer.value());
                        }
                        index -= 1;
                        buffer = EditBuffer::collapsed(self.history.get(index).unwrap_or_default());
                    }
                }
                EditKey::Insert(c) => buffer.insert(c.encode_utf8(&mut [0u8; 4])),
                other => {
                    edit_common(&mut buffer, other);
                }
            }
            scroll = scroll_to_cursor(scroll, buffer.cursor(), visible);
        }
    }
}

/// Smallest change to `scroll` that keeps `cursor` within `visible` columns.
fn scroll_to_cursor(scroll: usize, cursor: usize, visible: usize) -> usize {
    scroll.min(cursor).max(cursor.saturating_sub(visible))
}
