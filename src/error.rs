//! Unified error handling.
//!
//! The error surface is deliberately small: I/O setup failures are fatal and
//! abort the whole run; malformed records are not an error class (see
//! `reader`); end-of-stream is signalled with `None`, not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TraceFixError>;

/// Errors produced by tracefix.
#[derive(Debug, Error)]
pub enum TraceFixError {
    /// An input or output stream failed mid-run.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened or created at startup.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TraceFixError {
    /// Attach a path to an open/create failure.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
