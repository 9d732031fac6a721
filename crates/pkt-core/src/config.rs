#![forbid(unsafe_code)]

//! Editor configuration.
//!
//! Everything the engine draws with is collected in [`EditorConfig`]: the
//! color palette, the command-line prompt, and the key summary printed under
//! field help. Defaults reproduce the classic packet look; a few values can
//! be overridden from the environment with [`EditorConfig::from_env`].

use std::env;

use crate::color::Color;

/// Default prompt shown by the command-line reader.
pub const DEFAULT_PROMPT: &str = "packet>";

/// Default one-line key summary.
pub const DEFAULT_EDITOR_HELP: &str =
    "Editor: [F1]=Help [Tab]=Next [Shift-Tab]=Prev [ESC]=Exit [Ctrl-C]=Abort";

/// Environment variable overriding the prompt.
pub const PROMPT_ENV: &str = "PKT_PROMPT";

/// Colors used for each kind of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Plain text; also the default substituted for inherited halves.
    pub normal: Color,
    /// Field labels and the prompt.
    pub label: Color,
    /// Error messages.
    pub error: Color,
    /// The editable entry area.
    pub entry: Color,
    /// Selected text and the highlighted choice.
    pub selected: Color,
    /// Help text.
    pub help: Color,
    /// Hints beside the entry area.
    pub hint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: Color::new(254, 16),
            label: Color::new(51, 16),
            error: Color::new(202, 16),
            entry: Color::new(231, 238),
            selected: Color::new(16, 254),
            help: Color::new(254, 30),
            hint: Color::new(250, 16),
        }
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub palette: Palette,
    pub prompt: String,
    pub editor_help: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            prompt: DEFAULT_PROMPT.to_owned(),
            editor_help: DEFAULT_EDITOR_HELP.to_owned(),
        }
    }
}

impl EditorConfig {
    /// Defaults, with `PKT_PROMPT` applied when set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        match env::var(PROMPT_ENV) {
            Ok(prompt) if !prompt.is_empty() => config.prompt = prompt,
            _ => {}
        }
        config
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_editor_help(mut self, help: impl Into<String>) -> Self {
        self.editor_help = help.into();
        self
    }
}
