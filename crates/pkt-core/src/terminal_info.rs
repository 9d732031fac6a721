#![forbid(unsafe_code)]

//! Terminal capability probe.
//!
//! The engine only needs two facts about its terminal: how wide it is and
//! whether both ends are interactive. Width comes from the device when it can
//! be queried, then from `$COLUMNS`, then falls back to 80.

use std::env;
use std::io::IsTerminal;

/// Width used when nothing else is known.
pub const FALLBACK_WIDTH: u16 = 80;

/// Narrowest width the editor will lay out for.
pub const MIN_WIDTH: u16 = 20;

/// Facts about the attached terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalInfo {
    /// Columns available.
    pub width: u16,
    /// Standard input is a terminal.
    pub input_is_term: bool,
    /// Standard output is a terminal.
    pub output_is_term: bool,
}

#[derive(Debug, Default)]
struct DetectInputs {
    device_width: Option<u16>,
    columns: Option<String>,
    input_is_term: bool,
    output_is_term: bool,
}

impl DetectInputs {
    fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let device_width = crossterm::terminal::size().ok().map(|(cols, _)| cols);
        #[cfg(target_arch = "wasm32")]
        let device_width = None;
        Self {
            device_width,
            columns: env::var("COLUMNS").ok(),
            input_is_term: std::io::stdin().is_terminal(),
            output_is_term: std::io::stdout().is_terminal(),
        }
    }
}

impl TerminalInfo {
    /// Probe the process's standard streams and environment.
    #[must_use]
    pub fn detect() -> Self {
        let info = Self::from_inputs(DetectInputs::from_env());
        crate::debug!(
            width = info.width,
            input_is_term = info.input_is_term,
            output_is_term = info.output_is_term,
            "terminal detected"
        );
        info
    }

    /// A fixed description, for tests and non-terminal hosts.
    #[must_use]
    pub const fn fixed(width: u16, interactive: bool) -> Self {
        Self {
            width,
            input_is_term: interactive,
            output_is_term: interactive,
        }
    }

    fn from_inputs(inputs: DetectInputs) -> Self {
        let width = inputs
            .device_width
            .filter(|&w| w > 0)
            .or_else(|| {
                inputs
                    .columns
                    .as_deref()
                    .and_then(|c| c.trim().parse::<u16>().ok())
                    .filter(|&w| w > 0)
            })
            .unwrap_or(FALLBACK_WIDTH);
        Self {
            width: width.max(MIN_WIDTH),
            input_is_term: inputs.input_is_term,
            output_is_term: inputs.output_is_term,
        }
    }

    /// Both input and output are terminals, so live editing is possible.
    #[must_use]
    pub const fn interactive(&self) -> bool {
        self.input_is_term && self.output_is_term
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_width_wins() {
        let info = TerminalInfo::from_inputs(DetectInputs {
            device_width: Some(132),
            columns: Some("100".into()),
            ..Default::default()
        });
        assert_eq!(info.width, 132);
    }

    #[test]
    fn columns_env_is_second_choice() {
        let info = TerminalInfo::from_inputs(DetectInputs {
            device_width: None,
            columns: Some(" 100 ".into()),
            ..Default::default()
        });
        assert_eq!(info.width, 100);
    }

    #[test]
    fn garbage_columns_falls_back() {
        let info = TerminalInfo::from_inputs(DetectInputs {
            device_width: Some(0),
            columns: Some("wide".into()),
            ..Default::default()
        });
        assert_eq!(info.width, FALLBACK_WIDTH);
    }

    #[test]
    fn tiny_width_is_clamped() {
        let info = TerminalInfo::from_inputs(DetectInputs {
            device_width: Some(5),
            ..Default::default()
        });
        assert_eq!(info.width, MIN_WIDTH);
    }

    #[test]
    fn interactive_needs_both_ends() {
        assert!(TerminalInfo::fixed(80, true).interactive());
        let half = TerminalInfo {
            width: 80,
            input_is_term: true,
            output_is_term: false,
        };
        assert!(!half.interactive());
    }
}
