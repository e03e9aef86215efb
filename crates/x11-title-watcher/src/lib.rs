//! x11-title-watcher: observe the active window title on an X11 display.
//!
//! Two halves, each on its own connection:
//! - [`X11Inspector`] answers "what is the active window title right now"
//!   on demand. Cheap enough to call once per status line.
//! - [`TitleWatcher`] blocks in the X11 event loop and reports every property
//!   change that may have altered the visible title as a [`TitleEvent`].
//!
//! Integration overview (no code):
//! - Call [`X11Inspector::connect`] once at startup; a failure here means there
//!   is no usable display and is fatal.
//! - Call [`X11Inspector::watcher`] and move the returned [`TitleWatcher`] to
//!   a dedicated thread, then call [`TitleWatcher::run`] there. It never
//!   returns unless the connection breaks.
//! - Keep the inspector on the thread that renders output and call
//!   [`X11Inspector::active_window_title`] whenever a title is needed.

mod atoms;
mod event;
mod inspector;
mod watcher;

pub use atoms::{Atoms, classify};
pub use event::TitleEvent;
pub use inspector::X11Inspector;
pub use watcher::TitleWatcher;

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

/// Errors raised while talking to the X server.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not connect to X display: {0}")]
    Connect(#[from] ConnectError),
    #[error("X connection failed: {0}")]
    Connection(#[from] ConnectionError),
    #[error("X request failed: {0}")]
    Reply(#[from] ReplyError),
    #[error("X screen {0} does not exist")]
    NoScreen(usize),
    #[error("X protocol error: {0}")]
    Protocol(String),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
