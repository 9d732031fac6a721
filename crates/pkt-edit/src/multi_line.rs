#![forbid(unsafe_code)]

//! Multi-line mode: the label on its own row and the value word-wrapped
//! below it, indented by four columns.
//!
//! Home, End, Up, Down and Ctrl-K work on display lines, which the wrap's
//! offset table maps back to byte offsets in the value.

use std::io::{Read, Write};

use pkt_render::Screen;
use pkt_text::wrap;

use crate::editor::{EditResult, EditState, Mode, Step, read_edit_key};
use crate::error::EditOutcome;
use crate::help::show_help;
use crate::keys::{EditKey, edit_common};
use crate::terminal::Terminal;

/// Column where value lines start.
const INDENT: usize = 4;

impl EditState {
    pub(crate) fn multi_line_mode<R: Read, W: Write>(&mut self, term: &mut Terminal<R, W>) -> EditOutcome<Step> {
        let palette = term.palette();
        let wrap_width = term.width().saturating_sub(INDENT + 1);

        term.clean()?;
        loop {
            let shown = self.shown_value();
            let wrapped = wrap(&shown, wrap_width);
            let mut screen = Screen::new(term.region_width());
            screen.write_at(0, 0, palette.label, &self.label);
            for (i, (line, &offset)) in wrapped.lines().iter().zip(wrapped.offsets()).enumerate() {
                screen.fill(INDENT, wrap_width, i + 1, palette.entry);
                let (pre, sel, post) = self.buffer.split_line(line, offset);
                screen.write_at(INDENT, i + 1, palette.entry, pre);
                screen.write(palette.selected, sel);
                screen.write(palette.entry, post);
            }
            term.paint(&screen)?;
            let (col, line) = wrapped.position(self.buffer.cursor());
            term.move_to(col + INDENT, line + 1)?;

            let cursor = self.buffer.cursor();
            let len = self.buffer.len();
            match EditKey::from_key(read_edit_key(term)?) {
                EditKey::Home(extend) => {
                    let start = wrapped.line_start(wrapped.line_containing(cursor));
                    self.buffer.jump_back(start, extend);
                }
                EditKey::End(extend) => {
                    let end = wrapped.line_end(cursor, self.buffer.value());
                    self.buffer.jump_forward(end, extend);
                }
                EditKey::Up(extend) => self.buffer.jump_back(wrapped.line_above(cursor), extend),
                EditKey::Down(extend) => self.buffer.jump_forward(wrapped.line_below(cursor, len), extend),
                EditKey::KillLine => {
                    let end = wrapped.line_end(cursor, self.buffer.value());
                    self.buffer.kill_to(end);
                }
                EditKey::Next => return Ok(Step::Finish(EditResult::Next)),
                EditKey::Previous => return Ok(Step::Finish(EditResult::Previous)),
                EditKey::Exit => return Ok(Step::Finish(EditResult::Done)),
                EditKey::Enter => {
                    if self.buffer.is_empty() {
                        continue;
                    }
                    if self.buffer.whole_value_selected() || self.third_enter() {
                        return Ok(Step::Finish(EditResult::Next));
                    }
                    self.buffer.insert("\n");
                }
                EditKey::Redraw => return Ok(Step::Switch(Mode::MultiLine)),
                EditKey::Help => {
                    show_help(term, &self.help)?;
                    return Ok(Step::Switch(Mode::MultiLine));
                }
                EditKey::Insert(c) => self.buffer.insert(c.encode_utf8(&mut [0u8; 4])),
                other => {
                    edit_common(&mut self.buffer, other);
                }
            }
        }
    }

    /// Enter at the end of a value already ending in two newlines: the user
    /// is trying to leave the field.
    fn third_enter(&self) -> bool {
        let value = self.buffer.value();
        self.buffer.cursor() == value.len() && value.len() > 1 && value.ends_with("\n\n")
    }
}
