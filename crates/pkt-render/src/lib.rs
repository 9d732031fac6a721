#![forbid(unsafe_code)]

//! Render: the screen model, its row diff, ANSI output helpers, and the painter
//! that reconciles a terminal region with a freshly built model.

pub mod ansi;
pub mod cell;
pub mod counting_writer;
pub mod diff;
pub mod painter;
pub mod screen;

#[cfg(any(test, feature = "test-helpers"))]
pub mod virtual_terminal;

pub use cell::{Cell, Color};
pub use painter::Painter;
pub use screen::Screen;
