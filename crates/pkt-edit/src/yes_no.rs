#![forbid(unsafe_code)]

//! Inline yes/no question.

use std::io::{Read, Write};

use pkt_core::event::KeyCode;
use pkt_render::{Color, Screen};

use crate::editor::FieldEditor;
use crate::error::EditOutcome;
use crate::terminal::Terminal;

impl FieldEditor {
    /// Ask `question` and return the answer, starting from `default`.
    ///
    /// Left and Right toggle the highlighted answer and Enter accepts it;
    /// `y` and `n` answer directly. ESC, Ctrl-C and end of input all mean
    /// no. The question and the answer stay on screen afterwards.
    ///
    /// Without an interactive terminal one line is read instead: `y` or `n`
    /// answer, anything else takes the default, and end of input means no.
    ///
    /// # Errors
    ///
    /// Fails only when the terminal cannot be written or put in raw mode.
    pub fn confirm<R: Read, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        question: &str,
        default: bool,
    ) -> EditOutcome<bool> {
        if !term.info().interactive() {
            let Some(line) = term.read_line()? else {
                return Ok(false);
            };
            return Ok(match line.trim_start().chars().next() {
                Some('y' | 'Y') => true,
                Some('n' | 'N') => false,
                _ => default,
            });
        }

        let mut scope = term.raw_scope()?;
        let term = &mut *scope;
        let palette = term.palette();
        let yes_x = (self.label_width() + 2).max(question.len() + 2);
        let mut value = default;

        term.clean()?;
        term.show_cursor(false)?;
        let answer = loop {
            let (yes, no) = if value {
                (palette.selected, palette.normal)
            } else {
                (palette.normal, palette.selected)
            };
            let mut screen = Screen::new(term.region_width());
            screen.write_at(0, 0, palette.label, question);
            screen.write_at(yes_x, 0, yes, "Yes");
            screen.write(palette.normal, "  ");
            screen.write(no, "No");
            term.paint(&screen)?;
            term.move_to(yes_x, 0)?;

            let Ok(key) = term.read_key() else {
                break false;
            };
            if let Some(c) = key.printable() {
                match c {
                    'y' | 'Y' => break true,
                    'n' | 'N' => break false,
                    _ => continue,
                }
            }
            match key.code {
                KeyCode::Enter => break value,
                KeyCode::Left | KeyCode::Right => value = !value,
                KeyCode::Escape => break false,
                _ if key.is_ctrl('c') => break false,
                _ => {}
            }
        };
        pkt_core::debug!(question, answer, "confirm answered");

        term.move_to(yes_x, 0)?;
        term.print(Color::INHERIT, if answer { "Yes" } else { "No" })?;
        term.clear_to_eol()?;
        term.print(Color::INHERIT, "\n")?;
        term.clean()?;
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkt_core::terminal_info::TerminalInfo;
    use pkt_render::virtual_terminal::VirtualTerminal;

    fn ask(keys: &[u8], default: bool) -> (bool, String) {
        let mut term = Terminal::headless(keys.to_vec(), 40);
        let answer = FieldEditor::new(0).confirm(&mut term, "Send now?", default).unwrap();
        let mut vt = VirtualTerminal::new(40, 4);
        vt.feed(term.output());
        (answer, vt.screen_text())
    }

    #[test]
    fn enter_accepts_default() {
        assert_eq!(ask(b"\r", true), (true, "Send now?  Yes".to_owned()));
    }

    #[test]
    fn arrows_toggle() {
        assert_eq!(ask(b"\x1b[C\r", true), (false, "Send now?  No".to_owned()));
        assert_eq!(ask(b"\x1b[D\x1b[D\r", false), (false, "Send now?  No".to_owned()));
    }

    #[test]
    fn letters_answer_directly() {
        assert_eq!(ask(b"y", false).0, true);
        assert_eq!(ask(b"N", true).0, false);
    }

    #[test]
    fn escape_interrupt_and_eof_mean_no() {
        assert_eq!(ask(b"\x1b", true).0, false);
        assert_eq!(ask(b"\x03", true).0, false);
        assert_eq!(ask(b"", true).0, false);
    }

    #[test]
    fn label_width_sets_answer_column() {
        let mut term = Terminal::headless(b"\r".to_vec(), 40);
        FieldEditor::new(12).confirm(&mut term, "Send?", true).unwrap();
        let mut vt = VirtualTerminal::new(40, 4);
        vt.feed(term.output());
        assert_eq!(vt.row_text(0).trim_end(), "Send?         Yes");
    }

    #[test]
    fn batch_reads_a_line() {
        let batch = TerminalInfo::fixed(40, false);
        let mut term = Terminal::headless(b"yes\n".to_vec(), 40).with_info(batch);
        assert!(FieldEditor::new(0).confirm(&mut term, "Send?", false).unwrap());
        let mut term = Terminal::headless(b"\n".to_vec(), 40).with_info(batch);
        assert!(FieldEditor::new(0).confirm(&mut term, "Send?", true).unwrap());
        let mut term = Terminal::headless(Vec::new(), 40).with_info(batch);
        assert!(!FieldEditor::new(0).confirm(&mut term, "Send?", true).unwrap());
    }
}
