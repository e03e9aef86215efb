use std::{io::Error as IoError, result::Result as StdResult};

use thiserror::Error;

/// Failures while transforming a status stream.
///
/// Each variant has a stable process exit code; see [`Error::exit_code`].
#[derive(Error, Debug)]
pub enum Error {
    /// The stream ended (or failed) before the version header line.
    #[error("no version header on input")]
    MissingHeader(#[source] Option<IoError>),

    /// The stream ended (or failed) before the line opening the block array.
    #[error("no array opener on input")]
    MissingArrayStart(#[source] Option<IoError>),

    /// A status line was not a JSON array.
    #[error("bad status line JSON: {0}")]
    BadInput(#[source] serde_json::Error),

    /// A transformed line could not be encoded.
    #[error("could not encode status line: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading or writing failed mid-stream.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl Error {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingHeader(_) => 3,
            Self::MissingArrayStart(_) => 4,
            Self::BadInput(_) => 5,
            Self::Encode(_) => 6,
            Self::Io(_) => 7,
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = StdResult<T, Error>;
