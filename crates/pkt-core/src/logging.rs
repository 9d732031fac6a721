#![forbid(unsafe_code)]

//! Structured logging shims.
//!
//! With the `tracing` feature enabled the usual `tracing` macros are
//! re-exported from here and from the crate root. Without it, the same macro
//! names expand to nothing, so call sites such as
//! `pkt_core::debug!(rows = 3, "painted")` compile in both configurations.
//!
//! The `tracing-json` feature additionally provides [`init_subscriber`], which
//! installs a `tracing-subscriber` formatter filtered by the `PKT_LOG`
//! environment variable.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the log filter directive (e.g. `pkt_edit=debug`).
pub const LOG_ENV: &str = "PKT_LOG";

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when logging is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. The returned guard does nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

/// Install a global subscriber writing to stderr.
///
/// The filter comes from `PKT_LOG` and defaults to `warn`. With `json` set,
/// events are emitted as one JSON object per line. Returns `false` if a global
/// subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber(json: bool) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
