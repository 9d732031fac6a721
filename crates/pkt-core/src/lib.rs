#![forbid(unsafe_code)]

//! Core: key events, key decoding, raw-mode lifecycle, terminal probing, and configuration.

pub mod color;
pub mod config;
pub mod event;
pub mod key_decoder;
pub mod key_reader;
pub mod logging;
pub mod terminal_info;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
