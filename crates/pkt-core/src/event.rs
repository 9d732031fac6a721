#![forbid(unsafe_code)]

//! Logical key events.
//!
//! The engine is ASCII-only, so a [`KeyEvent`] is either a printable
//! character (`0x20..=0x7E`), a control key, or one of a small set of named
//! navigation keys. Control bytes that have no dedicated [`KeyCode`] are
//! reported as the corresponding letter with [`Modifiers::CTRL`], so Ctrl-A
//! arrives as `Char('a')` + CTRL.

use bitflags::bitflags;

/// A single decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Ctrl plus a letter, as produced by control bytes `0x01..=0x1A`.
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL)
    }

    /// Map a single non-ESC byte to a key.
    ///
    /// Returns `None` for bytes with the high bit set.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        let key = match byte {
            0x00 => Self::new(KeyCode::Null),
            0x08 | 0x7F => Self::new(KeyCode::Backspace),
            0x09 => Self::new(KeyCode::Tab),
            0x0A | 0x0D => Self::new(KeyCode::Enter),
            0x1B => Self::new(KeyCode::Escape),
            0x01..=0x1A => Self::ctrl(char::from(byte + 0x60)),
            0x1C..=0x1F => Self::ctrl(char::from(byte + 0x40)),
            0x20..=0x7E => Self::new(KeyCode::Char(char::from(byte))),
            _ => return None,
        };
        Some(key)
    }

    /// The printable character carried by this event, if any.
    ///
    /// Only unmodified `0x20..=0x7E` characters qualify.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.modifiers.is_empty() && (' '..='~').contains(&c) => Some(c),
            _ => None,
        }
    }

    /// Check for Ctrl plus a specific letter.
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers == Modifiers::CTRL && self.code == KeyCode::Char(c)
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl_held(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Key identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, or a letter when combined with CTRL.
    Char(char),
    /// Carriage return or line feed.
    Enter,
    /// A lone ESC byte.
    Escape,
    /// DEL or BS.
    Backspace,
    Tab,
    /// Shift+Tab (`CSI Z`).
    BackTab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    /// Function key; only F1 is decoded.
    F(u8),
    /// NUL byte (Ctrl+Space / Ctrl+@).
    Null,
}

bitflags! {
    /// Modifier keys that can accompany a key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes_map_to_ctrl_letters() {
        assert_eq!(KeyEvent::from_byte(0x01), Some(KeyEvent::ctrl('a')));
        assert_eq!(KeyEvent::from_byte(0x03), Some(KeyEvent::ctrl('c')));
        assert_eq!(KeyEvent::from_byte(0x16), Some(KeyEvent::ctrl('v')));
        assert_eq!(KeyEvent::from_byte(0x1F), Some(KeyEvent::ctrl('_')));
    }

    #[test]
    fn dedicated_control_keys() {
        assert_eq!(
            KeyEvent::from_byte(0x7F),
            Some(KeyEvent::new(KeyCode::Backspace))
        );
        assert_eq!(
            KeyEvent::from_byte(0x08),
            Some(KeyEvent::new(KeyCode::Backspace))
        );
        assert_eq!(KeyEvent::from_byte(b'\r'), Some(KeyEvent::new(KeyCode::Enter)));
        assert_eq!(KeyEvent::from_byte(b'\n'), Some(KeyEvent::new(KeyCode::Enter)));
        assert_eq!(KeyEvent::from_byte(b'\t'), Some(KeyEvent::new(KeyCode::Tab)));
    }

    #[test]
    fn high_bit_bytes_have_no_key() {
        assert_eq!(KeyEvent::from_byte(0x80), None);
        assert_eq!(KeyEvent::from_byte(0xFF), None);
    }

    #[test]
    fn printable_excludes_modified_chars() {
        assert_eq!(KeyEvent::new(KeyCode::Char('x')).printable(), Some('x'));
        assert_eq!(KeyEvent::ctrl('x').printable(), None);
        assert_eq!(KeyEvent::new(KeyCode::Enter).printable(), None);
    }
}
