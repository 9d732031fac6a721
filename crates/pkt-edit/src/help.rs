#![forbid(unsafe_code)]

//! F1 help: the field's help text and the editor key summary, printed above
//! the field in the help color.

use std::io::{self, Write};

use pkt_render::Color;
use pkt_text::wrap_lines;

use crate::editor::set_length;
use crate::terminal::Terminal;

/// Print `help` and the key summary at the region origin. The caller redraws
/// its mode below them afterwards.
pub(crate) fn show_help<R, W: Write>(term: &mut Terminal<R, W>, help: &str) -> io::Result<()> {
    let width = term.region_width();
    let color = term.palette().help;
    term.move_to(0, 0)?;
    term.clean()?;
    if !help.is_empty() {
        for line in wrap_lines(help, width) {
            term.print(color, &set_length(line, width))?;
            term.print(Color::INHERIT, "\n")?;
        }
    }
    let summary = set_length(&term.config().editor_help, width);
    term.print(color, &summary)?;
    term.print(Color::INHERIT, "\n")?;
    term.clean()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkt_render::virtual_terminal::VirtualTerminal;

    #[test]
    fn help_lines_are_padded_and_followed_by_summary() {
        let mut term = Terminal::headless(Vec::new(), 30);
        show_help(&mut term, "Who the message is for, as a call sign.").unwrap();
        let mut vt = VirtualTerminal::new(30, 6);
        vt.feed(term.output());
        assert_eq!(vt.row_text(0).trim_end(), "Who the message is for, as a");
        assert_eq!(vt.row_text(1).trim_end(), "call sign.");
        assert!(vt.row_text(2).starts_with("Editor: [F1]=Help"));
        // Padding uses the help background across the region.
        assert_eq!(vt.cell_at(28, 1).map(|c| c.bg), Some(30));
        assert_eq!(vt.cursor(), (0, 3));
    }
}
