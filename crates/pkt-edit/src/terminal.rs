#![forbid(unsafe_code)]

//! The terminal an editing session talks to.
//!
//! [`Terminal`] bundles the key reader, the painter with its memory of what
//! is on screen, the probed terminal facts and the editor configuration.
//! Everything that persists between edits lives here rather than in globals,
//! so one process can drive several independent terminals (or a scripted
//! one in tests).
//!
//! # Raw Mode
//!
//! [`Terminal::raw_scope`] enters raw mode for the duration of one edit and
//! returns a guard that dereferences to the terminal. When the guard drops,
//! cooked mode is restored and both the painted screen and the pending key
//! bytes are forgotten, since the terminal may be changed by others while
//! it is cooked. Terminals built with [`Terminal::headless`] never touch the
//! process's tty and keep their state across scopes.

use std::io::{self, Cursor, Read, Write};
use std::ops::{Deref, DerefMut};

use pkt_core::config::{EditorConfig, Palette};
use pkt_core::event::KeyEvent;
use pkt_core::key_reader::KeyReader;
use pkt_core::terminal_info::TerminalInfo;
#[cfg(not(target_arch = "wasm32"))]
use pkt_core::terminal_session::{RawSession, SessionOptions};
use pkt_render::{Color, Painter, Screen};

use crate::error::{EditError, EditOutcome};

/// Input, output and layout facts for editing.
#[derive(Debug)]
pub struct Terminal<R, W: Write> {
    keys: KeyReader<R>,
    painter: Painter<W>,
    info: TerminalInfo,
    config: EditorConfig,
    #[cfg(not(target_arch = "wasm32"))]
    raw_mode: Option<SessionOptions>,
    status_shown: bool,
}

impl Terminal<io::Stdin, io::Stdout> {
    /// The process's standard streams, with configuration from the
    /// environment.
    #[must_use]
    pub fn stdio() -> Self {
        Self::stdio_with_config(EditorConfig::from_env())
    }

    #[must_use]
    pub fn stdio_with_config(config: EditorConfig) -> Self {
        let term = Self::new(io::stdin(), io::stdout(), TerminalInfo::detect(), config);
        #[cfg(not(target_arch = "wasm32"))]
        let term = term.with_raw_mode(SessionOptions::default());
        term
    }
}

impl Terminal<Cursor<Vec<u8>>, Vec<u8>> {
    /// A scripted, interactive terminal: `keys` are the bytes typed, output
    /// is collected in memory, and raw mode is never entered.
    #[must_use]
    pub fn headless(keys: impl Into<Vec<u8>>, width: u16) -> Self {
        Self::new(
            Cursor::new(keys.into()),
            Vec::new(),
            TerminalInfo::fixed(width, true),
            EditorConfig::default(),
        )
    }
}

impl<R, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, info: TerminalInfo, config: EditorConfig) -> Self {
        let painter = Painter::new(output).with_default_color(config.palette.normal);
        Self {
            keys: KeyReader::new(input),
            painter,
            info,
            config,
            #[cfg(not(target_arch = "wasm32"))]
            raw_mode: None,
            status_shown: false,
        }
    }

    /// Enter raw mode with `options` in every [`raw_scope`](Self::raw_scope).
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn with_raw_mode(mut self, options: SessionOptions) -> Self {
        self.raw_mode = Some(options);
        self
    }

    #[must_use]
    pub fn with_info(mut self, info: TerminalInfo) -> Self {
        self.info = info;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.painter.set_default_color(config.palette.normal);
        self.config = config;
        self
    }

    #[must_use]
    pub fn info(&self) -> TerminalInfo {
        self.info
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.config.palette
    }

    /// Terminal width in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.info.width)
    }

    /// Width of the editing region. The last column is never written, so a
    /// full row cannot trigger autowrap.
    #[must_use]
    pub fn region_width(&self) -> usize {
        self.width().saturating_sub(1)
    }

    #[must_use]
    pub fn painter(&self) -> &Painter<W> {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut Painter<W> {
        &mut self.painter
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &W {
        self.painter.get_ref()
    }

    pub fn into_output(self) -> W {
        self.painter.into_inner()
    }

    /// Forget the painted screen and any pending key bytes.
    pub fn reset(&mut self) {
        self.painter.reset();
        self.keys.reset();
        self.status_shown = false;
    }

    /// Queue `key` to be read again.
    pub fn unread_key(&mut self, key: KeyEvent) {
        self.keys.unread(key);
    }

    // ── Output ──────────────────────────────────────────────────────────

    pub fn paint(&mut self, screen: &Screen) -> io::Result<()> {
        self.painter.paint(screen)
    }

    pub fn move_to(&mut self, x: usize, y: usize) -> io::Result<()> {
        self.painter.move_to(x, y)
    }

    /// Print outside the screen model; `Color::INHERIT` means normal text.
    pub fn print(&mut self, color: Color, text: &str) -> io::Result<()> {
        self.painter.print(color, text)
    }

    pub fn clear_to_eol(&mut self) -> io::Result<()> {
        self.painter.clear_to_eol()
    }

    pub fn show_cursor(&mut self, show: bool) -> io::Result<()> {
        self.painter.show_cursor(show)
    }

    /// Erase from the cursor row down and start a new region there.
    pub fn clean(&mut self) -> io::Result<()> {
        self.status_shown = false;
        self.painter.clean()
    }

    /// Return to the region origin and erase the region.
    pub(crate) fn close_region(&mut self) -> io::Result<()> {
        self.painter.move_to(0, 0)?;
        self.clean()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.painter.flush()
    }

    pub(crate) fn status_shown(&self) -> bool {
        self.status_shown
    }

    pub(crate) fn set_status_shown(&mut self, shown: bool) {
        self.status_shown = shown;
    }
}

impl<R: Read, W: Write> Terminal<R, W> {
    /// Flush pending output, then block for the next key.
    ///
    /// # Errors
    ///
    /// [`EditError::InputClosed`] at end of input, [`EditError::Io`] when
    /// reading or flushing fails.
    pub fn read_key(&mut self) -> EditOutcome<KeyEvent> {
        self.painter.flush()?;
        match self.keys.read_key()? {
            Some(key) => Ok(key),
            None => Err(EditError::InputClosed),
        }
    }

    /// Read the rest of the input without decoding it.
    pub(crate) fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.keys.read_all()
    }

    /// Read one cooked line; `None` at end of input.
    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        self.painter.flush()?;
        self.keys.read_line()
    }

    /// Enter raw mode until the returned guard drops.
    ///
    /// # Errors
    ///
    /// Fails if the terminal cannot be put in raw mode.
    pub fn raw_scope(&mut self) -> io::Result<RawScope<'_, R, W>> {
        #[cfg(not(target_arch = "wasm32"))]
        let session = match self.raw_mode.clone() {
            Some(options) => Some(RawSession::new(options)?),
            None => None,
        };
        Ok(RawScope {
            term: self,
            #[cfg(not(target_arch = "wasm32"))]
            session,
        })
    }
}

/// Raw mode held for one edit. Dereferences to the [`Terminal`].
#[derive(Debug)]
pub struct RawScope<'t, R, W: Write> {
    term: &'t mut Terminal<R, W>,
    #[cfg(not(target_arch = "wasm32"))]
    session: Option<RawSession>,
}

impl<R, W: Write> Deref for RawScope<'_, R, W> {
    type Target = Terminal<R, W>;

    fn deref(&self) -> &Self::Target {
        self.term
    }
}

impl<R, W: Write> DerefMut for RawScope<'_, R, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.term
    }
}

impl<R, W: Write> Drop for RawScope<'_, R, W> {
    fn drop(&mut self) {
        let _ = self.term.flush();
        #[cfg(not(target_arch = "wasm32"))]
        let released = self.session.take().map(RawSession::restore).is_some();
        #[cfg(target_arch = "wasm32")]
        let released = false;
        if released {
            self.term.reset();
            pkt_core::debug!("raw scope closed, terminal state forgotten");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkt_core::event::KeyCode;

    #[test]
    fn headless_is_interactive_and_never_raw() {
        let mut term = Terminal::headless(b"a".to_vec(), 40);
        assert!(term.info().interactive());
        assert_eq!(term.region_width(), 39);
        let mut scope = term.raw_scope().unwrap();
        assert!(scope.session.is_none());
        assert_eq!(scope.read_key().unwrap(), KeyEvent::new(KeyCode::Char('a')));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut term = Terminal::headless(Vec::new(), 40);
        assert!(matches!(term.read_key(), Err(EditError::InputClosed)));
    }

    #[test]
    fn headless_scopes_keep_typeahead() {
        let mut term = Terminal::headless(b"ab".to_vec(), 40);
        {
            let mut scope = term.raw_scope().unwrap();
            assert_eq!(scope.read_key().unwrap().code, KeyCode::Char('a'));
        }
        let mut scope = term.raw_scope().unwrap();
        assert_eq!(scope.read_key().unwrap().code, KeyCode::Char('b'));
    }

    #[test]
    fn reset_forgets_painted_screen_and_pending_keys() {
        let mut term = Terminal::headless(b"xyz".to_vec(), 40);
        let mut screen = Screen::new(term.region_width());
        screen.write_at(0, 0, Color::INHERIT, "hello");
        term.paint(&screen).unwrap();
        assert_eq!(term.read_key().unwrap().code, KeyCode::Char('x'));
        term.reset();
        assert!(term.painter().painted().is_none());
        assert!(matches!(term.read_key(), Err(EditError::InputClosed)));
    }

    #[test]
    fn config_colors_reach_the_painter() {
        let palette = Palette {
            normal: Color::new(7, 0),
            ..Palette::default()
        };
        let term = Terminal::headless(Vec::new(), 40).with_config(EditorConfig::default().with_palette(palette));
        assert_eq!(term.painter().default_color(), Color::new(7, 0));
    }
}
