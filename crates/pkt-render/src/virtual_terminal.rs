#![forbid(unsafe_code)]

//! In-memory terminal for tests.
//!
//! `VirtualTerminal` interprets the subset of ANSI output the painter and
//! editor emit, so tests can assert on what a user would actually see
//! instead of on raw escape bytes.
//!
//! # Invariants
//!
//! 1. **Cursor in bounds**: `x <= width`, `y < height`. `x == width` is the
//!    pending-wrap state; the next printable byte wraps to the next row.
//! 2. **Grid fully populated**: every row always holds `width` cells.
//! 3. **Line feed on the bottom row scrolls**: the top row is discarded and
//!    [`VirtualTerminal::scrolled`] is incremented.
//!
//! # Supported Sequences
//!
//! | Bytes | Effect |
//! |-------|--------|
//! | `\r`, `\n`, `\x08` | CR, LF (with scroll), BS |
//! | `CSI n A/B/C/D` | relative moves, clamped |
//! | `CSI K`, `CSI J` | erase to end of line / display |
//! | `CSI ... m` | `0`, `38;5;n`, `48;5;n` |
//! | `CSI ? 25 h/l` | cursor visibility |
//!
//! Anything else is ignored.

use crate::cell::Color;
use crate::screen::Screen;

/// One cell of the virtual grid. Color indices of 0 mean "terminal default".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VCell {
    pub ch: char,
    pub fg: u8,
    pub bg: u8,
}

impl Default for VCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: 0,
            bg: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct VirtualTerminal {
    width: usize,
    height: usize,
    rows: Vec<Vec<VCell>>,
    x: usize,
    y: usize,
    fg: u8,
    bg: u8,
    cursor_visible: bool,
    scrolled: usize,
    state: State,
}

impl VirtualTerminal {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![VCell::default(); width]; height],
            x: 0,
            y: 0,
            fg: 0,
            bg: 0,
            cursor_visible: true,
            scrolled: 0,
            state: State::Ground,
        }
    }

    /// Start with the cursor on row `y`, as if earlier output had moved it.
    pub fn with_cursor_row(mut self, y: usize) -> Self {
        self.y = y.min(self.height.saturating_sub(1));
        self
    }

    pub fn feed(&mut self, data: &[u8]) {
        for &b in data {
            self.step(b);
        }
    }

    pub fn feed_str(&mut self, s: &str) {
        self.feed(s.as_bytes());
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Rows scrolled off the top so far.
    pub fn scrolled(&self) -> usize {
        self.scrolled
    }

    pub fn cell_at(&self, x: usize, y: usize) -> Option<&VCell> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        self.cell_at(x, y).map(|c| c.ch)
    }

    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// All rows joined with `\n`, trailing blanks trimmed.
    pub fn screen_text(&self) -> String {
        let lines: Vec<String> = (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_owned())
            .collect();
        lines.join("\n").trim_end().to_owned()
    }

    /// Check that rows `origin..` show `screen`, resolving inherited halves
    /// (and the terminal's own default) to `default`.
    ///
    /// Returns a description of the first mismatch.
    pub fn region_matches(&self, screen: &Screen, origin: usize, default: Color) -> Result<(), String> {
        for y in 0..screen.height() {
            let Some(row) = screen.row(y) else { break };
            for (x, cell) in row.iter().enumerate() {
                let Some(got) = self.cell_at(x, origin + y) else {
                    return Err(format!("cell ({x}, {y}) is off screen"));
                };
                let want = cell.color.or_default(default);
                let have = Color::new(got.fg, got.bg).or_default(default);
                if got.ch != char::from(cell.ch) || have != want {
                    return Err(format!(
                        "cell ({x}, {y}): want {:?} {want:?}, have {:?} {have:?}",
                        char::from(cell.ch),
                        got.ch
                    ));
                }
            }
        }
        Ok(())
    }

    fn step(&mut self, b: u8) {
        match std::mem::replace(&mut self.state, State::Ground) {
            State::Ground => self.ground(b),
            State::Escape => {
                if b == b'[' {
                    self.state = State::Csi(Vec::new());
                }
            }
            State::Csi(mut params) => match b {
                0x30..=0x3F => {
                    params.push(b);
                    self.state = State::Csi(params);
                }
                0x40..=0x7E => self.dispatch_csi(&params, b),
                _ => {}
            },
        }
    }

    fn ground(&mut self, b: u8) {
        match b {
            0x1B => self.state = State::Escape,
            b'\r' => self.x = 0,
            b'\n' => self.line_feed(),
            0x08 => self.x = self.x.saturating_sub(1),
            0x20..=0x7E => self.put(char::from(b)),
            _ => {}
        }
    }

    fn put(&mut self, ch: char) {
        if self.x >= self.width {
            self.x = 0;
            self.line_feed();
        }
        let (fg, bg) = (self.fg, self.bg);
        self.rows[self.y][self.x] = VCell { ch, fg, bg };
        self.x += 1;
    }

    fn line_feed(&mut self) {
        if self.y + 1 < self.height {
            self.y += 1;
        } else {
            self.rows.remove(0);
            self.rows.push(vec![VCell::default(); self.width]);
            self.scrolled += 1;
        }
    }

    fn erase(&mut self, y: usize, from: usize) {
        let blank = VCell {
            ch: ' ',
            fg: self.fg,
            bg: self.bg,
        };
        for cell in self.rows[y].iter_mut().skip(from) {
            *cell = blank;
        }
    }

    fn dispatch_csi(&mut self, params: &[u8], final_byte: u8) {
        let text = String::from_utf8_lossy(params);
        let private = text.starts_with('?');
        let nums: Vec<usize> = text
            .trim_start_matches('?')
            .split(';')
            .map(|p| p.parse().unwrap_or(0))
            .collect();
        let n = nums.first().copied().filter(|&n| n > 0).unwrap_or(1);
        match final_byte {
            b'A' => self.y = self.y.saturating_sub(n),
            b'B' => self.y = (self.y + n).min(self.height - 1),
            b'C' => self.x = (self.x + n).min(self.width.saturating_sub(1)),
            b'D' => self.x = self.x.min(self.width).saturating_sub(n),
            b'K' => self.erase(self.y, self.x),
            b'J' => {
                self.erase(self.y, self.x);
                for y in self.y + 1..self.height {
                    self.erase(y, 0);
                }
            }
            b'm' => self.sgr(&nums),
            b'h' | b'l' if private && nums.first() == Some(&25) => {
                self.cursor_visible = final_byte == b'h';
            }
            _ => {}
        }
    }

    fn sgr(&mut self, nums: &[usize]) {
        let mut i = 0;
        while i < nums.len() {
            match nums[i] {
                0 => {
                    self.fg = 0;
                    self.bg = 0;
                }
                38 | 48 if nums.get(i + 1) == Some(&5) => {
                    let index = nums.get(i + 2).copied().unwrap_or(0) as u8;
                    if nums[i] == 38 {
                        self.fg = index;
                    } else {
                        self.bg = index;
                    }
                    i += 2;
                }
                _ => {}
            }
            i += 1;
        }
    }
}
