#![forbid(unsafe_code)]

//! Edit failures.

use std::fmt;
use std::io;

/// Why an edit ended without a result.
///
/// Every variant aborts the edit: the in-progress value is not applied to
/// the field.
#[derive(Debug)]
pub enum EditError {
    /// Reading keys or writing to the terminal failed.
    Io(io::Error),
    /// The input reached end of file in the middle of an edit.
    InputClosed,
    /// The user pressed Ctrl-C.
    Interrupted,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Io(e) => write!(f, "terminal I/O error: {e}"),
            EditError::InputClosed => f.write_str("input closed"),
            EditError::Interrupted => f.write_str("interrupted"),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditError::Io(e) => Some(e),
            EditError::InputClosed | EditError::Interrupted => None,
        }
    }
}

impl From<io::Error> for EditError {
    fn from(e: io::Error) -> Self {
        EditError::Io(e)
    }
}

/// Result type for edit operations.
pub type EditOutcome<T> = Result<T, EditError>;
