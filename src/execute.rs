//! High-level file creation with production adapters
//!
//! This module provides `CreateRequest`, a serializable description of one file
//! to create, and helpers that run requests against a `FileCreator`.

use crate::filesystem::FilesystemError;
use crate::writer::{FileCreator, FileWriter, FileWriterError};
use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while executing a request
#[derive(Debug, Error, Diagnostic)]
pub enum ExecuteError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Writer(#[from] FileWriterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// One file to create
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRequest {
    /// Directory to create and write into; the writer's current directory is
    /// used when absent
    #[serde(default)]
    pub directory: Option<String>,

    /// File name, appended to the directory
    pub name: String,

    /// Lines to write, in order
    #[serde(default)]
    pub lines: Vec<String>,
}

impl CreateRequest {
    /// Create a request for an empty file called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            directory: None,
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Set the directory to write into
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Set the lines to write
    #[must_use]
    pub fn with_lines<I, L>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Apply one request to `creator`, returning the path that was written
///
/// # Errors
///
/// Returns an error if configuring the directory or writing the file fails.
pub fn apply_request<C: FileCreator>(
    creator: &mut C,
    request: &CreateRequest,
) -> Result<String, ExecuteError> {
    if let Some(directory) = request.directory.as_deref() {
        creator.set_directory(directory)?;
    }
    creator.create_file(&request.name, &request.lines)?;
    Ok(creator.file_path(&request.name))
}

/// Execute a request with a fresh physical `FileWriter`
///
/// # Errors
///
/// See [`apply_request`].
///
/// # Example
///
/// ```no_run
/// use file_creator::{execute, CreateRequest};
///
/// let request = CreateRequest::new("a.txt")
///     .with_directory("out")
///     .with_lines(["x", "y"]);
///
/// let path = execute(&request)?;
/// assert_eq!(path, "out/a.txt");
/// # Ok::<(), file_creator::ExecuteError>(())
/// ```
pub fn execute(request: &CreateRequest) -> Result<String, ExecuteError> {
    apply_request(&mut FileWriter::physical(), request)
}

/// Apply requests in order with one shared creator
///
/// A directory set by an earlier request stays in effect for later requests
/// that don't name one. Stops at the first error.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn execute_all<'r, C, I>(creator: &mut C, requests: I) -> Result<Vec<String>, ExecuteError>
where
    C: FileCreator,
    I: IntoIterator<Item = &'r CreateRequest>,
{
    requests
        .into_iter()
        .map(|request| -> Result<String, ExecuteError> {
            let path = apply_request(creator, request)?;
            tracing::debug!(path = %path, "Created file");
            Ok(path)
        })
        .collect()
}
