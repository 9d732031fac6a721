#![forbid(unsafe_code)]

//! Field editor: the mode state machine around one field edit.
//!
//! An edit runs in one of three modes and may hop between them:
//!
//! ```text
//!            printable key, empty value
//!   Choices ──────────────────────────────▶ SingleLine
//!                                               │
//!                     overflow, Enter in a      │
//!                     multiline field, Ctrl-V   ▼
//!                                           MultiLine
//! ```
//!
//! Each mode draws its region, reads keys until it either finishes the edit
//! or asks for another mode (possibly itself, to redraw from scratch), and
//! always leaves the region erased with the cursor back on its first row.
//! After the last mode finishes, the value is applied to the field and the
//! field is printed read-only in its final form.
//!
//! When standard input is not a terminal the edit is a batch edit: the rest
//! of the input becomes the value.

use std::io::{Read, Write};

use pkt_core::event::KeyEvent;
use pkt_text::EditBuffer;

use crate::display::display_value;
use crate::error::{EditError, EditOutcome};
use crate::field::Field;
use crate::terminal::Terminal;

/// How an edit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditResult {
    /// Move on to the next field (Tab, Enter).
    Next,
    /// Go back to the previous field (Shift-Tab).
    Previous,
    /// Stop editing fields (ESC).
    Done,
    /// The value came from non-interactive input, which is now exhausted.
    Eof,
}

/// Presentation used for a field while it is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    SingleLine,
    MultiLine,
    Choices,
}

/// What a mode wants after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Switch(Mode),
    Finish(EditResult),
}

/// Everything a mode needs, copied out of the field at the start of an edit.
#[derive(Debug, Clone)]
pub(crate) struct EditState {
    pub(crate) label: String,
    pub(crate) label_width: usize,
    pub(crate) field_width: usize,
    pub(crate) choices: Vec<String>,
    pub(crate) multiline: bool,
    pub(crate) help: String,
    pub(crate) hint: String,
    pub(crate) hidden: bool,
    pub(crate) buffer: EditBuffer,
}

impl EditState {
    pub(crate) fn from_field<F: Field + ?Sized>(field: &F, label_width: usize) -> Self {
        let label = field.label().to_owned();
        let choices = field.choices().to_vec();
        let field_width = choices.iter().map(String::len).fold(field.width(), usize::max);
        Self {
            label_width: label_width.max(label.len()),
            label,
            field_width,
            choices,
            multiline: field.multiline(),
            help: field.help().to_owned(),
            hint: field.hint().to_owned(),
            hidden: field.hide_value(),
            buffer: EditBuffer::new(editable(&field.value())),
        }
    }

    /// Mode an edit starts in on a terminal `width` columns wide.
    pub(crate) fn initial_mode(&self, width: usize) -> Mode {
        let value = self.buffer.value();
        if !self.choices.is_empty() && (value.is_empty() || self.choices.iter().any(|c| c == value)) {
            Mode::Choices
        } else if self.label_width + 2 + value.len() >= width || value.contains('\n') {
            Mode::MultiLine
        } else {
            Mode::SingleLine
        }
    }

    /// The value as drawn: masked when the field hides it.
    pub(crate) fn shown_value(&self) -> String {
        if self.hidden {
            mask(self.buffer.value())
        } else {
            self.buffer.value().to_owned()
        }
    }

    /// Run modes from `mode` until one finishes the edit.
    pub(crate) fn run<R: Read, W: Write>(
        &mut self,
        term: &mut Terminal<R, W>,
        mut mode: Mode,
    ) -> EditOutcome<EditResult> {
        loop {
            let step = match mode {
                Mode::SingleLine => self.single_line_mode(term),
                Mode::MultiLine => self.multi_line_mode(term),
                Mode::Choices => self.choices_mode(term),
            };
            let closed = term.close_region();
            match step? {
                Step::Switch(next) => {
                    closed?;
                    pkt_core::debug!(from = ?mode, to = ?next, "edit mode switch");
                    mode = next;
                }
                Step::Finish(result) => {
                    closed?;
                    return Ok(result);
                }
            }
        }
    }
}

/// Replace what the editor cannot show (non-ASCII, control bytes other than
/// newline) with `?`.
fn editable(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\n' || (' '..='~').contains(&c) { c } else { '?' })
        .collect()
}

/// `*` for every byte except newlines.
pub(crate) fn mask(value: &str) -> String {
    value.chars().map(|c| if c == '\n' { '\n' } else { '*' }).collect()
}

/// `text` cut or space-padded to exactly `len` bytes.
pub(crate) fn set_length(text: &str, len: usize) -> String {
    if text.len() >= len {
        text[..len].to_owned()
    } else {
        format!("{text:<len$}")
    }
}

/// Edits fields whose labels line up in a column `label_width` wide.
///
/// # Example
///
/// ```
/// use pkt_edit::{EditResult, Field, FieldEditor, SimpleField, Terminal};
///
/// // Type "W6XYZ" over the empty value, then Tab to the next field.
/// let mut term = Terminal::headless(b"W6XYZ\t".to_vec(), 80);
/// let mut field = SimpleField::new("To", "");
/// let result = FieldEditor::new(8).edit(&mut term, &mut field)?;
/// assert_eq!(result, EditResult::Next);
/// assert_eq!(field.value(), "W6XYZ");
/// # Ok::<(), pkt_edit::EditError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldEditor {
    label_width: usize,
}

impl FieldEditor {
    #[must_use]
    pub const fn new(label_width: usize) -> Self {
        Self { label_width }
    }

    #[must_use]
    pub const fn label_width(&self) -> usize {
        self.label_width
    }

    /// Print the key summary that precedes a run of field edits.
    ///
    /// Prints nothing unless the terminal is interactive.
    pub fn start<R, W: Write>(term: &mut Terminal<R, W>) -> EditOutcome<()> {
        if !term.info().interactive() {
            return Ok(());
        }
        let line = set_length(&term.config().editor_help, term.region_width());
        let help = term.palette().help;
        term.print(help, &line)?;
        term.print(pkt_render::Color::INHERIT, "\n")?;
        Ok(())
    }

    /// Edit `field` and apply the result.
    ///
    /// On an interactive terminal the edit runs in raw mode, and the field
    /// is printed read-only afterwards. Otherwise the rest of the input is
    /// applied as the value and [`EditResult::Eof`] is returned.
    ///
    /// # Errors
    ///
    /// Fails without applying anything on Ctrl-C, end of input, or a
    /// terminal I/O error.
    pub fn edit<F, R, W>(&self, term: &mut Terminal<R, W>, field: &mut F) -> EditOutcome<EditResult>
    where
        F: Field + ?Sized,
        R: Read,
        W: Write,
    {
        if !term.info().interactive() {
            return read_batch(term, field);
        }
        let mut scope = term.raw_scope()?;
        self.edit_once(&mut *scope, field).map(|(result, _)| result)
    }

    /// [`edit`](Self::edit), then check the field and edit again while it
    /// reports a problem.
    ///
    /// The problem is printed as an error before the edit restarts. Going
    /// back to the previous field skips the check, and so does a restarted
    /// edit the user left unchanged, so an invalid value can always be
    /// walked past.
    pub fn edit_validated<F, R, W>(&self, term: &mut Terminal<R, W>, field: &mut F) -> EditOutcome<EditResult>
    where
        F: Field + ?Sized,
        R: Read,
        W: Write,
    {
        if !term.info().interactive() {
            return read_batch(term, field);
        }
        let mut scope = term.raw_scope()?;
        let mut restarted = false;
        loop {
            let (result, changed) = self.edit_once(&mut *scope, field)?;
            if result == EditResult::Previous || (restarted && !changed) {
                return Ok(result);
            }
            match field.validate() {
                Some(problem) => {
                    pkt_core::debug!(label = field.label(), problem = %problem, "field rejected");
                    scope.error(&problem)?;
                    restarted = true;
                }
                None => return Ok(result),
            }
        }
    }

    fn edit_once<F, R, W>(&self, term: &mut Terminal<R, W>, field: &mut F) -> EditOutcome<(EditResult, bool)>
    where
        F: Field + ?Sized,
        R: Read,
        W: Write,
    {
        let mut state = EditState::from_field(field, self.label_width);
        let mode = state.initial_mode(term.width());
        pkt_core::debug!(label = %state.label, mode = ?mode, "edit started");
        let result = state.run(term, mode)?;
        field.apply(state.buffer.value());
        let value = field.value();
        display_value(term, &state.label, &value, state.label_width, state.hidden)?;
        pkt_core::debug!(label = %state.label, result = ?result, changed = state.buffer.changed(), "edit finished");
        Ok((result, state.buffer.changed()))
    }

    /// Print `field` read-only, aligned the way an edit leaves it.
    pub fn display<F, R, W>(&self, term: &mut Terminal<R, W>, field: &F) -> EditOutcome<()>
    where
        F: Field + ?Sized,
        W: Write,
    {
        let label_width = self.label_width.max(field.label().len());
        display_value(term, field.label(), &field.value(), label_width, field.hide_value())?;
        Ok(())
    }
}

/// Apply everything left on the input as the value.
fn read_batch<F, R, W>(term: &mut Terminal<R, W>, field: &mut F) -> EditOutcome<EditResult>
where
    F: Field + ?Sized,
    R: Read,
    W: Write,
{
    let contents = term.read_all()?;
    let text = String::from_utf8_lossy(&contents);
    let text = text
        .trim_end_matches(['\r', '\n'])
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    field.apply(&text);
    pkt_core::debug!(label = field.label(), bytes = text.len(), "batch value applied");
    Ok(EditResult::Eof)
}

/// Read a key, turning Ctrl-C into [`EditError::Interrupted`].
pub(crate) fn read_edit_key<R: Read, W: Write>(term: &mut Terminal<R, W>) -> EditOutcome<KeyEvent> {
    let key = term.read_key()?;
    if key.is_ctrl('c') {
        return Err(EditError::Interrupted);
    }
    Ok(key)
}
