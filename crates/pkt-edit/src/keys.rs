#![forbid(unsafe_code)]

//! Editing meaning of keys shared by the field modes and the command line.

use pkt_core::event::{KeyCode, KeyEvent, Modifiers};
use pkt_text::EditBuffer;

/// What a key asks the text editor to do. The `bool` on movements is
/// "extend the selection" (Shift held).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditKey {
    Home(bool),
    End(bool),
    Left(bool),
    Right(bool),
    WordLeft(bool),
    WordRight(bool),
    Up(bool),
    Down(bool),
    Backspace,
    Delete,
    KillLine,
    ClearAll,
    Interrupt,
    Next,
    Previous,
    Enter,
    Exit,
    Redraw,
    Help,
    Verbatim,
    Insert(char),
    Other,
}

impl EditKey {
    pub(crate) fn from_key(key: KeyEvent) -> Self {
        let shift = key.shift();
        if let Some(c) = key.printable() {
            return Self::Insert(c);
        }
        match key.code {
            KeyCode::Home => Self::Home(shift),
            KeyCode::End => Self::End(shift),
            KeyCode::Left if key.ctrl_held() => Self::WordLeft(shift),
            KeyCode::Right if key.ctrl_held() => Self::WordRight(shift),
            KeyCode::Left => Self::Left(shift),
            KeyCode::Right => Self::Right(shift),
            KeyCode::Up => Self::Up(shift),
            KeyCode::Down => Self::Down(shift),
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Tab => Self::Next,
            KeyCode::BackTab => Self::Previous,
            KeyCode::Enter => Self::Enter,
            KeyCode::Escape => Self::Exit,
            KeyCode::F(1) => Self::Help,
            KeyCode::Char(c) if key.modifiers == Modifiers::CTRL => match c {
                'a' => Self::Home(false),
                'b' => Self::Left(false),
                'c' => Self::Interrupt,
                'd' => Self::Delete,
                'e' => Self::End(false),
                'f' => Self::Right(false),
                'k' => Self::KillLine,
                'l' => Self::Redraw,
                'n' => Self::Down(false),
                'p' => Self::Up(false),
                'u' => Self::ClearAll,
                'v' => Self::Verbatim,
                _ => Self::Other,
            },
            _ => Self::Other,
        }
    }
}

/// Apply the keys every text mode treats alike. Returns false for keys
/// left to the caller.
pub(crate) fn edit_common(buffer: &mut EditBuffer, key: EditKey) -> bool {
    match key {
        EditKey::Left(extend) => buffer.left(extend),
        EditKey::Right(extend) => buffer.right(extend),
        EditKey::WordLeft(extend) => buffer.word_left(extend),
        EditKey::WordRight(extend) => buffer.word_right(extend),
        EditKey::Backspace => buffer.backspace(),
        EditKey::Delete => buffer.delete_forward(),
        EditKey::ClearAll => buffer.clear(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn emacs_controls() {
        assert_eq!(EditKey::from_key(KeyEvent::ctrl('a')), EditKey::Home(false));
        assert_eq!(EditKey::from_key(KeyEvent::ctrl('e')), EditKey::End(false));
        assert_eq!(EditKey::from_key(KeyEvent::ctrl('k')), EditKey::KillLine);
        assert_eq!(EditKey::from_key(KeyEvent::ctrl('c')), EditKey::Interrupt);
        assert_eq!(EditKey::from_key(KeyEvent::ctrl('z')), EditKey::Other);
    }

    #[test]
    fn shift_and_ctrl_arrows() {
        let shift_left = key(KeyCode::Left).with_modifiers(Modifiers::SHIFT);
        assert_eq!(EditKey::from_key(shift_left), EditKey::Left(true));
        let ctrl_right = key(KeyCode::Right).with_modifiers(Modifiers::CTRL);
        assert_eq!(EditKey::from_key(ctrl_right), EditKey::WordRight(false));
        let both = key(KeyCode::Left).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(EditKey::from_key(both), EditKey::WordLeft(true));
    }

    #[test]
    fn common_keys_edit_the_buffer() {
        let mut buf = EditBuffer::collapsed("one two");
        assert!(edit_common(&mut buf, EditKey::WordLeft(false)));
        assert_eq!(buf.cursor(), 4);
        assert!(edit_common(&mut buf, EditKey::Backspace));
        assert_eq!(buf.value(), "onetwo");
        assert!(edit_common(&mut buf, EditKey::ClearAll));
        assert!(buf.is_empty());
        assert!(!edit_common(&mut buf, EditKey::Enter));
    }

    #[test]
    fn printable_characters_insert() {
        assert_eq!(EditKey::from_key(key(KeyCode::Char('x'))), EditKey::Insert('x'));
        assert_eq!(EditKey::from_key(key(KeyCode::Char(' '))), EditKey::Insert(' '));
        assert_eq!(EditKey::from_key(key(KeyCode::F(1))), EditKey::Help);
        assert_eq!(EditKey::from_key(key(KeyCode::Null)), EditKey::Other);
    }
}
