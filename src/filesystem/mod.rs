//! Filesystem abstraction - the primary test seam
//!
//! This module defines the traits `FileWriter` depends on: a `DirectoryManager`
//! that creates directories and a `LineStreamFactory` that opens `LineSink`s.
//! Production code uses `PhysicalFS`; tests use `MemoryFS` or `RecordingFS`.

pub mod memory;
pub mod physical;
pub(crate) mod recording;

use std::path::PathBuf;
use thiserror::Error;

/// Line terminator appended after every written line
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator appended after every written line
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Errors raised by filesystem collaborators
#[derive(Debug, Error, miette::Diagnostic)]
pub enum FilesystemError {
    #[error("I/O error on {path}: {source}")]
    #[diagnostic(code(file_creator::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem lock poisoned")]
    LockError,

    #[error("Sink for {path} was already released")]
    AlreadyReleased { path: PathBuf },

    #[error("{message}")]
    Injected { message: String },
}

impl FilesystemError {
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from(path),
            source,
        }
    }
}

/// Creates directories
pub trait DirectoryManager {
    /// Create the directory at `path`, including missing parents
    ///
    /// Must succeed when the directory already exists.
    fn create_directory(&self, path: &str) -> Result<(), FilesystemError>;
}

/// An open, writable handle that accepts one line at a time
pub trait LineSink {
    /// Write `text` followed by a line terminator
    fn write_line(&mut self, text: &str) -> Result<(), FilesystemError>;

    /// Flush and close the sink
    ///
    /// Callers invoke this exactly once, after the last write or after a failed one.
    fn release(&mut self) -> Result<(), FilesystemError>;
}

/// Opens line sinks for a path
pub trait LineStreamFactory {
    type Sink: LineSink;

    /// Open `path` for writing, truncating any existing file
    fn open_for_writing(&self, path: &str) -> Result<Self::Sink, FilesystemError>;
}
