#![forbid(unsafe_code)]

//! Choice-list mode: the field's choices laid out in a grid beside or
//! below a small empty entry area, with the current value highlighted.
//!
//! The entry area is cell (0, 0) of the grid. Arrow keys move the highlight
//! and the value with it; moving to the entry area empties the value, and
//! typing into an empty value drops into single-line mode.

use std::io::{Read, Write};

use pkt_render::Screen;

use crate::editor::{EditResult, EditState, Mode, Step, read_edit_key, set_length};
use crate::error::EditOutcome;
use crate::help::show_help;
use crate::keys::EditKey;
use crate::terminal::Terminal;

/// Width of the empty entry cell.
const ENTRY_WIDTH: usize = 4;

/// Gap between choice columns.
const COLUMN_GAP: usize = 2;

/// Where each choice goes. Row 0 starts with the entry area (the empty
/// string); `xs[c]` is the x of column `c` on the rows that use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChoiceGrid {
    pub(crate) xs: Vec<usize>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl ChoiceGrid {
    /// Lay out `choices` for a terminal `width` columns wide.
    ///
    /// Tries one row of choices, then two, and so on, keeping the first
    /// layout that fits. If even one choice per row is too wide, that
    /// single-column layout is used anyway and clipped when drawn.
    pub(crate) fn layout(choices: &[String], label_width: usize, width: usize) -> Self {
        let count = choices.len().max(1);
        (1..=count)
            .find_map(|lines| Self::try_layout(choices, label_width, width, lines))
            .unwrap_or_else(|| Self::columns(choices, count).0)
    }

    fn try_layout(choices: &[String], label_width: usize, width: usize, lines: usize) -> Option<Self> {
        let (mut grid, right) = Self::columns(choices, lines);
        if right >= width {
            return None;
        }
        if lines == 1 && right + label_width + ENTRY_WIDTH < width {
            // Everything fits on the entry row itself.
            for x in &mut grid.xs {
                *x += label_width + ENTRY_WIDTH;
            }
            grid.xs.insert(0, label_width + 2);
            let mut row = vec![String::new()];
            row.extend(grid.rows.remove(1));
            grid.rows = vec![row];
        }
        Some(grid)
    }

    /// Column-major placement in `lines` rows below the entry row. Returns
    /// the grid and the rightmost column reached.
    fn columns(choices: &[String], lines: usize) -> (Self, usize) {
        let mut rows = vec![Vec::new(); lines + 1];
        rows[0].push(String::new());
        let mut xs = vec![ENTRY_WIDTH];
        let mut right = ENTRY_WIDTH;
        for (i, choice) in choices.iter().enumerate() {
            if i != 0 && i % lines == 0 {
                right += COLUMN_GAP;
                xs.push(right);
            }
            rows[i % lines + 1].push(choice.clone());
            right = right.max(xs[i / lines] + choice.len());
        }
        (Self { xs, rows }, right)
    }

    /// Position of `value` in the grid; the entry area if it is not there.
    pub(crate) fn find(&self, value: &str) -> (usize, usize) {
        if value.is_empty() {
            return (0, 0);
        }
        for (line, row) in self.rows.iter().enumerate() {
            if let Some(col) = row.iter().position(|c| c == value) {
                return (line, col);
            }
        }
        (0, 0)
    }

    /// Clamp a requested move to cells that exist.
    pub(crate) fn clamp(&self, line: isize, col: isize) -> (usize, usize) {
        let last_line = self.rows.len().saturating_sub(1);
        let line = usize::try_from(line.max(0)).unwrap_or(0).min(last_line);
        let last_col = self.rows[line].len().saturating_sub(1);
        let col = usize::try_from(col.max(0)).unwrap_or(0).min(last_col);
        (line, col)
    }
}

impl EditState {
    pub(crate) fn choices_mode<R: Read, W: Write>(&mut self, term: &mut Terminal<R, W>) -> EditOutcome<Step> {
        let palette = term.palette();
        let grid = ChoiceGrid::layout(&self.choices, self.label_width, term.width());
        let entry_x = self.label_width + 2;

        term.clean()?;
        loop {
            let (sel_line, sel_col) = grid.find(self.buffer.value());
            let mut screen = Screen::new(term.region_width());
            screen.write_at(0, 0, palette.label, &set_length(&self.label, entry_x));
            screen.fill(entry_x, ENTRY_WIDTH, 0, palette.entry);
            for (line, row) in grid.rows.iter().enumerate() {
                for (col, choice) in row.iter().enumerate() {
                    if choice.is_empty() {
                        continue;
                    }
                    let color = if (line, col) == (sel_line, sel_col) {
                        palette.selected
                    } else {
                        palette.normal
                    };
                    screen.write_at(grid.xs[col], line, color, choice);
                }
            }
            term.paint(&screen)?;
            term.move_to(entry_x, 0)?;
            term.show_cursor(self.buffer.is_empty())?;

            let key = read_edit_key(term)?;
            let (line, col) = (sel_line as isize, sel_col as isize);
            let (line, col) = match EditKey::from_key(key) {
                EditKey::Backspace | EditKey::Delete => (0, 0),
                EditKey::Next | EditKey::Enter => return Ok(Step::Finish(EditResult::Next)),
                EditKey::Previous => return Ok(Step::Finish(EditResult::Previous)),
                EditKey::Exit => return Ok(Step::Finish(EditResult::Done)),
                EditKey::Redraw => return Ok(Step::Switch(Mode::Choices)),
                EditKey::Help => {
                    show_help(term, &self.help)?;
                    return Ok(Step::Switch(Mode::Choices));
                }
                EditKey::Up(false) => (line - 1, col),
                EditKey::Down(false) => (line + 1, col),
                EditKey::Left(false) => (line, col - 1),
                EditKey::Right(false) => (line, col + 1),
                EditKey::Home(false) => (line, 0),
                EditKey::End(false) => (line, grid.xs.len() as isize),
                EditKey::Insert(_) if self.buffer.is_empty() => {
                    term.unread_key(key);
                    return Ok(Step::Switch(Mode::SingleLine));
                }
                _ => continue,
            };
            let (line, col) = grid.clamp(line, col);
            if (line, col) != (sel_line, sel_col) {
                self.buffer.set_value(grid.rows[line][col].clone());
            }
        }
    }
}
