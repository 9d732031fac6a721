#![forbid(unsafe_code)]

//! Interactive field editing for the packet terminal.
//!
//! A [`Terminal`] pairs a key reader with a painter over a small region at
//! the bottom of the screen. On it, [`FieldEditor`] edits one [`Field`] at a
//! time in one of three modes (single-line, multi-line, choice list),
//! [`FieldEditor::confirm`] asks a yes/no question, and
//! [`CommandLineReader`] reads command lines with history.
//!
//! When input is not a terminal, every operation falls back to reading
//! plain lines so scripts can drive the same code.
//!
//! # Example
//! ```
//! use pkt_edit::{EditResult, FieldEditor, SimpleField, Terminal};
//!
//! // Typing "ALPHA" then Enter into an empty field.
//! let mut term = Terminal::headless(b"ALPHA\r".to_vec(), 80);
//! let mut to = SimpleField::new("To", "");
//! let result = FieldEditor::new(4).edit(&mut term, &mut to)?;
//! assert_eq!(result, EditResult::Next);
//! assert_eq!(to.get(), "ALPHA");
//! # Ok::<(), pkt_edit::EditError>(())
//! ```

mod choices;
pub mod command_line;
mod display;
pub mod editor;
pub mod error;
pub mod field;
mod help;
mod keys;
mod messages;
mod multi_line;
mod single_line;
pub mod terminal;
mod yes_no;

pub use command_line::{CommandLineReader, History};
pub use editor::{EditResult, FieldEditor, Mode};
pub use error::{EditError, EditOutcome};
pub use field::{Field, SimpleField, Validator};
pub use terminal::{RawScope, Terminal};
