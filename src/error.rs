use core::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for logging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The file operation that failed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FileOp {
    /// Opening (and possibly creating) the file
    Open,
    /// Writing the line
    Write,
    /// Flushing the buffered line
    Flush,
    /// Syncing data to storage
    Sync,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Write => "write",
            Self::Flush => "flush",
            Self::Sync => "sync",
        })
    }
}

/// Broad classification of an [`Error`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    /// The logger is pointed at something it may not or cannot use.
    Configuration,
    /// The underlying system refused an operation.
    Io,
}

/// Errors raised while emitting a line.
#[derive(Debug, Error)]
pub enum Error {
    /// The target file is absent and creation is disabled.
    #[error("log file {} does not exist and creation is disabled", .path.display())]
    MissingFile {
        /// Resolved file path
        path: PathBuf,
    },

    /// A parent directory of the target could not be created.
    #[error("error creating log file path {}: {source}", .path.display())]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Opening, writing, flushing or syncing the file failed.
    #[error("error during {op} of log file {}: {source}", .path.display())]
    File {
        /// Failed step
        op: FileOp,
        /// Resolved file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Writing to the console target failed.
    #[error("error writing log line to console: {0}")]
    Console(#[source] io::Error),

    /// The timestamp could not be formatted.
    #[error("error formatting log timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl Error {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile { .. } | Self::CreateDir { .. } => ErrorKind::Configuration,
            Self::File { .. } | Self::Console(_) | Self::Timestamp(_) => ErrorKind::Io,
        }
    }
}
