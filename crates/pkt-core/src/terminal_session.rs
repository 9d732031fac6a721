#![forbid(unsafe_code)]

//! Raw-mode lifecycle guard.
//!
//! Live editing needs the terminal in raw mode: bytes delivered one at a time,
//! no echo, no line buffering. [`RawSession`] enters raw mode when created and
//! restores cooked mode when dropped, so every exit path out of an editing
//! loop (return, `?`, panic unwinding) puts the terminal back.
//!
//! # Cleanup Order
//!
//! 1. Stop the signal guard thread (unix)
//! 2. Show the cursor
//! 3. Leave raw mode
//! 4. Flush stdout
//!
//! A process-wide panic hook and, on unix, a SIGINT/SIGTERM watcher perform
//! the same restoration on a best-effort basis for exits that skip `Drop`.
//!
//! ```no_run
//! use pkt_core::terminal_session::{RawSession, SessionOptions};
//!
//! let session = RawSession::new(SessionOptions::default())?;
//! // ... read keys, paint ...
//! drop(session); // cooked mode again
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Raw session configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Restore the terminal and exit on SIGINT/SIGTERM (unix only).
    pub restore_on_signal: bool,
    /// Install the process-wide panic hook that restores the terminal.
    pub restore_on_panic: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            restore_on_signal: true,
            restore_on_panic: true,
        }
    }
}

/// Owns raw mode for its lifetime.
#[derive(Debug)]
pub struct RawSession {
    active: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl RawSession {
    /// Enter raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the signal watcher
    /// cannot be registered.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        if options.restore_on_panic {
            install_panic_hook();
        }

        crossterm::terminal::enable_raw_mode()?;
        crate::info!("terminal raw mode enabled");

        #[cfg(unix)]
        let signal_guard = if options.restore_on_signal {
            match SignalGuard::new() {
                Ok(guard) => Some(guard),
                Err(err) => {
                    let _ = crossterm::terminal::disable_raw_mode();
                    return Err(err);
                }
            }
        } else {
            None
        };

        Ok(Self {
            active: true,
            #[cfg(unix)]
            signal_guard,
        })
    }

    /// Whether raw mode is still held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restore cooked mode now instead of at drop.
    pub fn restore(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if !self.active {
            return;
        }
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        self.active = false;
        crate::info!("terminal raw mode disabled");
    }
}

impl Drop for RawSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\r\x1b[0m\x1b[J");
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                crate::warn!(signal, "termination signal received, restoring terminal");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
