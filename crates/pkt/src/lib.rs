#![forbid(unsafe_code)]

//! Packet terminal editor public facade.
//!
//! Re-exports the types an application needs from the layer crates, a
//! top-level [`Error`], and a [`prelude`] for everyday use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use pkt_core::color::Color;
pub use pkt_core::config::{EditorConfig, Palette};
pub use pkt_core::event::{KeyCode, KeyEvent, Modifiers};
pub use pkt_core::key_decoder::KeyDecoder;
pub use pkt_core::key_reader::KeyReader;
pub use pkt_core::terminal_info::TerminalInfo;
#[cfg(not(target_arch = "wasm32"))]
pub use pkt_core::terminal_session::{RawSession, SessionOptions};

// --- Render re-exports -----------------------------------------------------

pub use pkt_render::{Cell, Painter, Screen};

// --- Text re-exports -------------------------------------------------------

pub use pkt_text::{EditBuffer, Wrapped, autocomplete, wrap};

// --- Editor re-exports -----------------------------------------------------

pub use pkt_edit::{
    CommandLineReader, EditError, EditOutcome, EditResult, Field, FieldEditor, History, Mode,
    RawScope, SimpleField, Terminal, Validator,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for packet terminal applications.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside an edit.
    Io(std::io::Error),
    /// An edit or prompt was aborted.
    Edit(EditError),
    /// Terminal setup error with message.
    Terminal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Edit(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Edit(err) => Some(err),
            Self::Terminal(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<EditError> for Error {
    fn from(err: EditError) -> Self {
        match err {
            EditError::Io(io) => Self::Io(io),
            other => Self::Edit(other),
        }
    }
}

impl Error {
    /// Whether the user asked to stop (Ctrl-C or end of input) rather than
    /// something going wrong.
    #[must_use]
    pub fn is_user_exit(&self) -> bool {
        matches!(self, Self::Edit(EditError::Interrupted | EditError::InputClosed))
    }
}

/// Standard result type for packet terminal APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CommandLineReader, EditResult, EditorConfig, Error, Field, FieldEditor, KeyCode, KeyEvent,
        Modifiers, Result, SimpleField, Terminal, TerminalInfo,
    };

    pub use crate::{core, edit, render, text};
}

pub use pkt_core as core;
pub use pkt_edit as edit;
pub use pkt_render as render;
pub use pkt_text as text;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn edit_io_errors_flatten_to_io() {
        let err: Error = EditError::Io(std::io::Error::other("gone")).into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_user_exit());
    }

    #[test]
    fn interrupt_is_a_user_exit() {
        let err: Error = EditError::Interrupted.into();
        assert!(err.is_user_exit());
        assert_eq!(err.to_string(), "interrupted");
        assert!(err.source().is_some());
    }

    #[test]
    fn terminal_errors_carry_their_message() {
        let err = Error::Terminal("no tty".into());
        assert_eq!(err.to_string(), "no tty");
        assert!(err.source().is_none());
    }
}
