//! Rewrite an i3bar JSON status stream so every status line carries the
//! active window title as an extra block.
//!
//! The stream is a version header line, a line opening an endless JSON array,
//! and then one JSON array of blocks per line, each after the first prefixed
//! with a comma. Only that line framing is understood; the blocks themselves
//! pass through as opaque JSON values.

mod block;
mod error;
mod stream;

pub use block::{DEFAULT_COLOR, Placement, TITLE_BLOCK_NAME, TitleBlock, TitleOptions, truncate_and_pad};
pub use error::{Error, Result};
pub use stream::{run, transform_line};
