#![forbid(unsafe_code)]

//! Text handling for the packet field editor.
//!
//! Values are plain ASCII, so every offset here is a byte offset and every
//! byte is one terminal cell.
//!
//! - [`words`]: previous/next word boundaries
//! - [`buffer`]: [`EditBuffer`], a value plus cursor and selection
//! - [`wrap`]: word wrap with a line-offset table
//! - [`autocomplete`]: longest common prefix among matching choices
//!
//! # Example
//! ```
//! use pkt_text::{EditBuffer, autocomplete};
//!
//! let mut buf = EditBuffer::new("");
//! buf.insert("A");
//! buf.insert("L");
//! assert_eq!(buf.value(), "AL");
//! assert_eq!(autocomplete("AL", &["ALPHA", "ALPS", "BETA"]).as_deref(), Some("ALP"));
//! ```

pub mod autocomplete;
pub mod buffer;
pub mod words;
pub mod wrap;

pub use autocomplete::{autocomplete, common_prefix_len};
pub use buffer::{EditBuffer, split_on_select};
pub use words::{next_word, prev_word};
pub use wrap::{Wrapped, wrap, wrap_lines, wrap_text};
