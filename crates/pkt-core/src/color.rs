#![forbid(unsafe_code)]

//! Packed 256-color attribute.
//!
//! A [`Color`] holds a background and a foreground palette index in one
//! `u16`: `bg << 8 | fg`. A zero half means "inherit the default", which is
//! resolved against a base color by [`Color::or_default`] before any
//! comparison with what the terminal currently shows.

/// Packed (background, foreground) palette pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u16);

impl Color {
    /// Both halves inherit.
    pub const INHERIT: Self = Self(0);

    /// Build from a foreground and a background palette index.
    #[must_use]
    pub const fn new(fg: u8, bg: u8) -> Self {
        Self(((bg as u16) << 8) | fg as u16)
    }

    /// Wrap an already packed value.
    #[must_use]
    pub const fn from_packed(packed: u16) -> Self {
        Self(packed)
    }

    /// The packed `bg << 8 | fg` value.
    #[must_use]
    pub const fn packed(self) -> u16 {
        self.0
    }

    /// Foreground index (0 = inherit).
    #[must_use]
    pub const fn fg(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// Background index (0 = inherit).
    #[must_use]
    pub const fn bg(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Substitute `default`'s halves for any zero half of `self`.
    #[must_use]
    pub const fn or_default(self, default: Self) -> Self {
        let fg = if self.fg() == 0 { default.fg() } else { self.fg() };
        let bg = if self.bg() == 0 { default.bg() } else { self.bg() };
        Self::new(fg, bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_background_high() {
        let c = Color::new(231, 238);
        assert_eq!(c.packed(), 238 * 256 + 231);
        assert_eq!(c.fg(), 231);
        assert_eq!(c.bg(), 238);
    }

    #[test]
    fn or_default_fills_only_zero_halves() {
        let normal = Color::new(254, 16);
        assert_eq!(Color::INHERIT.or_default(normal), normal);
        assert_eq!(Color::new(51, 0).or_default(normal), Color::new(51, 16));
        assert_eq!(Color::new(0, 30).or_default(normal), Color::new(254, 30));
        assert_eq!(Color::new(1, 2).or_default(normal), Color::new(1, 2));
    }
}
