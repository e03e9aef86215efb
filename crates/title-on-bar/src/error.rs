use std::io;

use thiserror::Error;

/// Fatal errors for the binary, each with its own exit code.
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to nudge on title changes.
    #[error("no {0} PID could be found")]
    MissingStatusProcess(String),

    /// The X display could not be used.
    #[error(transparent)]
    Display(#[from] x11_title_watcher::Error),

    /// The status stream could not be transformed.
    #[error(transparent)]
    Stream(#[from] i3bar::Error),

    /// A worker thread could not be started.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Which worker failed.
        name: &'static str,
        /// Why the OS refused.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Process exit code for this failure.
    ///
    /// `2` is left to clap for bad arguments; `3`..`7` come from the stream.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Stream(e) => e.exit_code(),
            Self::MissingStatusProcess(_) => 8,
            Self::Display(_) => 9,
            Self::Spawn { .. } => 1,
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Print helpful hints for common errors.
pub fn print_hints(err: &Error) {
    match err {
        Error::MissingStatusProcess(name) => {
            eprintln!("hint: start {name} first, e.g. `{name} | i3status-title-on-bar`");
            eprintln!("      or pick another process with --process-name");
        }
        Error::Display(_) => {
            eprintln!("hint: check that DISPLAY is set or pass --display");
        }
        _ => {}
    }
}
