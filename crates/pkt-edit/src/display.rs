#![forbid(unsafe_code)]

//! Read-only field display.
//!
//! A value whose longest line fits beside the label is aligned in the value
//! column, continuation lines indented to match. Anything wider goes on the
//! rows below the label, word-wrapped and indented by four.

use std::io::{self, Write};

use pkt_render::Color;
use pkt_text::wrap_lines;

use crate::editor::mask;
use crate::terminal::Terminal;

pub(crate) fn display_value<R, W: Write>(
    term: &mut Terminal<R, W>,
    label: &str,
    value: &str,
    label_width: usize,
    hidden: bool,
) -> io::Result<()> {
    let width = term.width();
    let label_color = term.palette().label;
    let value = value.trim_end_matches('\n');
    let shown = if hidden { mask(value) } else { value.to_owned() };

    term.print(label_color, label)?;
    let longest = shown.split('\n').map(str::len).max().unwrap_or(0);
    let (lines, indent) = if longest <= width.saturating_sub(label_width + 3) {
        let pad = (label_width + 2).saturating_sub(label.len());
        term.print(Color::INHERIT, &" ".repeat(pad))?;
        (shown.split('\n').collect::<Vec<_>>(), label_width + 2)
    } else {
        term.print(Color::INHERIT, "\n    ")?;
        (wrap_lines(&shown, width.saturating_sub(5)), 4)
    };
    let indent = " ".repeat(indent);
    for (i, line) in lines.iter().enumerate() {
        if i != 0 {
            term.print(Color::INHERIT, &indent)?;
        }
        term.print(Color::INHERIT, line)?;
        term.print(Color::INHERIT, "\n")?;
    }
    Ok(())
}
