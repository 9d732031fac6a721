#![forbid(unsafe_code)]

//! Single-line mode: the value on the label's row, in a fixed-width entry
//! area with an optional hint beside it.

use std::io::{Read, Write};

use pkt_render::Screen;
use pkt_text::autocomplete;

use crate::editor::{EditResult, EditState, Mode, Step, read_edit_key};
use crate::error::EditOutcome;
use crate::help::show_help;
use crate::keys::{EditKey, edit_common};
use crate::terminal::Terminal;

impl EditState {
    pub(crate) fn single_line_mode<R: Read, W: Write>(&mut self, term: &mut Terminal<R, W>) -> EditOutcome<Step> {
        let width = term.width();
        let palette = term.palette();
        let entry_x = self.label_width + 2;
        let field_width = if self.field_width == 0 || entry_x + self.field_width >= width {
            width.saturating_sub(entry_x + 1)
        } else {
            self.field_width
        };
        let hint_fits = !self.hint.is_empty() && entry_x + field_width + self.hint.len() + 2 < width;
        let mut verbatim = false;

        term.clean()?;
        loop {
            let mut screen = Screen::new(term.region_width());
            screen.write_at(0, 0, palette.label, &self.label);
            screen.fill(entry_x, field_width, 0, palette.entry);
            if hint_fits && self.buffer.len() <= field_width {
                screen.write_at(entry_x + field_width + 2, 0, palette.hint, &self.hint);
            }
            let shown = self.shown_value();
            let (pre, sel, post) = self.buffer.split_line(&shown, 0);
            screen.write_at(entry_x, 0, palette.entry, pre);
            screen.write(palette.selected, sel);
            screen.write(palette.entry, post);
            term.paint(&screen)?;
            term.move_to(entry_x + self.buffer.cursor(), 0)?;

            let key = EditKey::from_key(read_edit_key(term)?);
            let literal = std::mem::take(&mut verbatim);
            match key {
                EditKey::Home(extend) => self.buffer.jump_back(0, extend),
                EditKey::End(extend) => {
                    let len = self.buffer.len();
                    self.buffer.jump_forward(len, extend);
                }
                EditKey::KillLine => self.buffer.kill_to_end(),
                EditKey::Next => return Ok(Step::Finish(EditResult::Next)),
                EditKey::Previous => return Ok(Step::Finish(EditResult::Previous)),
                EditKey::Exit => return Ok(Step::Finish(EditResult::Done)),
                EditKey::Enter => {
                    if !literal && self.buffer.whole_value_selected() {
                        // Enter over the untouched value just moves on.
                        return Ok(Step::Finish(EditResult::Next));
                    }
                    if literal || (self.buffer.cursor() != 0 && self.multiline) {
                        self.buffer.insert("\n");
                        return Ok(Step::Switch(Mode::MultiLine));
                    }
                    return Ok(Step::Finish(EditResult::Next));
                }
                EditKey::Redraw => return Ok(Step::Switch(Mode::SingleLine)),
                EditKey::Verbatim => verbatim = true,
                EditKey::Help => {
                    show_help(term, &self.help)?;
                    return Ok(Step::Switch(Mode::SingleLine));
                }
                EditKey::Insert(c) => {
                    self.buffer.insert(c.encode_utf8(&mut [0u8; 4]));
                    self.complete();
                    if entry_x + self.buffer.len() >= width {
                        return Ok(Step::Switch(Mode::MultiLine));
                    }
                }
                other => {
                    edit_common(&mut self.buffer, other);
                }
            }
        }
    }

    /// After typing at the end of the value, extend it to the longest
    /// prefix shared by the matching choices, selecting the added part.
    fn complete(&mut self) {
        let cursor = self.buffer.cursor();
        if cursor != self.buffer.len() {
            return;
        }
        if let Some(completed) = autocomplete(self.buffer.value(), &self.choices) {
            let end = completed.len();
            self.buffer.set_value_selected(completed, cursor, cursor, end);
        }
    }
}
