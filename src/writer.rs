//! `FileWriter` - configure an output directory and write line-based files
//!
//! The writer depends only on the `DirectoryManager` and `LineStreamFactory`
//! traits, so all of its behavior is testable against in-memory doubles.

use crate::filesystem::physical::PhysicalFS;
use crate::filesystem::{DirectoryManager, FilesystemError, LineSink, LineStreamFactory};
use miette::Diagnostic;
use thiserror::Error;

/// Errors returned when configuring the output directory
#[derive(Debug, Error, Diagnostic)]
pub enum FileWriterError {
    /// No path was given
    #[error("You must provide a path")]
    #[diagnostic(code(file_creator::null_path))]
    NullPath,

    /// The path was empty or whitespace only
    #[error("Directory path must not be blank")]
    #[diagnostic(
        code(file_creator::blank_path),
        help("pass a directory name containing at least one non-whitespace character")
    )]
    BlankPath,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Abstract file creation interface
///
/// Implemented by `FileWriter`; callers that only need to create files can
/// depend on this trait instead of the concrete collaborators.
pub trait FileCreator {
    /// Create `path` as the output directory and remember it
    ///
    /// # Errors
    ///
    /// `NullPath` for `None`, `BlankPath` for an empty or whitespace-only path,
    /// otherwise whatever directory creation fails with.
    fn set_directory<'a>(
        &mut self,
        path: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, FileWriterError>;

    /// Write `lines` to the file `name` inside the configured directory
    ///
    /// # Errors
    ///
    /// Any error from opening, writing or releasing the sink, unchanged.
    fn create_file<L: AsRef<str>>(&self, name: &str, lines: &[L]) -> Result<(), FilesystemError>;

    /// The path `create_file` would write `name` to
    fn file_path(&self, name: &str) -> String;
}

/// Writes text files line by line into an optional output directory
///
/// ```no_run
/// use file_creator::FileWriter;
///
/// let mut writer = FileWriter::physical();
/// writer
///     .set_directory("out")?
///     .create_file("a.txt", &["x", "y"])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileWriter<D, S> {
    directories: D,
    streams: S,
    directory: Option<String>,
}

impl FileWriter<PhysicalFS, PhysicalFS> {
    /// Writer backed by the real filesystem
    #[must_use]
    pub fn physical() -> Self {
        Self::new(PhysicalFS::new(), PhysicalFS::new())
    }
}

impl<D: DirectoryManager, S: LineStreamFactory> FileWriter<D, S> {
    /// Create an unconfigured writer over the given collaborators
    pub fn new(directories: D, streams: S) -> Self {
        Self {
            directories,
            streams,
            directory: None,
        }
    }

    /// The currently configured directory, if any
    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// Create the directory at `path` and use it for subsequent files
    ///
    /// Returns `self` so configuration can be chained into `create_file`.
    /// Calling this again re-creates the new directory and replaces the old
    /// path. If directory creation fails, the previous path is kept.
    ///
    /// # Errors
    ///
    /// * `FileWriterError::NullPath` - `path` is `None`
    /// * `FileWriterError::BlankPath` - `path` is empty or whitespace only
    /// * `FileWriterError::Filesystem` - the directory manager failed
    pub fn set_directory<'a>(
        &mut self,
        path: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, FileWriterError> {
        let Some(path) = path.into() else {
            return Err(FileWriterError::NullPath);
        };
        if path.trim().is_empty() {
            return Err(FileWriterError::BlankPath);
        }

        self.directories.create_directory(path)?;
        tracing::debug!(directory = path, "Configured output directory");
        self.directory = Some(path.to_string());
        Ok(self)
    }

    /// The path a file called `name` is written to
    ///
    /// This is a literal `directory + "/" + name`; separators are not
    /// normalized, so `out/` and `a.txt` give `out//a.txt`.
    #[must_use]
    pub fn file_path(&self, name: &str) -> String {
        match self.directory.as_deref() {
            Some(directory) if !directory.trim().is_empty() => format!("{directory}/{name}"),
            _ => name.to_string(),
        }
    }

    /// Write every line of `lines`, in order, to the file `name`
    ///
    /// Existing files are overwritten. An empty `lines` produces an empty file.
    /// The sink is released exactly once, also when a write fails.
    ///
    /// # Errors
    ///
    /// Errors from the stream factory or the sink are returned unchanged. When a
    /// write fails, that error wins over a failure to release.
    pub fn create_file<L: AsRef<str>>(
        &self,
        name: &str,
        lines: &[L],
    ) -> Result<(), FilesystemError> {
        let path = self.file_path(name);
        tracing::debug!(path = %path, lines = lines.len(), "Creating file");

        let mut sink = SinkGuard::new(self.streams.open_for_writing(&path)?, &path);
        for line in lines {
            sink.write_line(line.as_ref())?;
        }
        sink.release()
    }
}

impl<D: DirectoryManager, S: LineStreamFactory> FileCreator for FileWriter<D, S> {
    fn set_directory<'a>(
        &mut self,
        path: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, FileWriterError> {
        FileWriter::set_directory(self, path)
    }

    fn create_file<L: AsRef<str>>(&self, name: &str, lines: &[L]) -> Result<(), FilesystemError> {
        FileWriter::create_file(self, name, lines)
    }

    fn file_path(&self, name: &str) -> String {
        FileWriter::file_path(self, name)
    }
}

/// Releases the wrapped sink when dropped, unless it was released explicitly
struct SinkGuard<'a, K: LineSink> {
    sink: K,
    path: &'a str,
    released: bool,
}

impl<'a, K: LineSink> SinkGuard<'a, K> {
    fn new(sink: K, path: &'a str) -> Self {
        Self {
            sink,
            path,
            released: false,
        }
    }

    fn write_line(&mut self, text: &str) -> Result<(), FilesystemError> {
        self.sink.write_line(text)
    }

    fn release(mut self) -> Result<(), FilesystemError> {
        self.released = true;
        self.sink.release()
    }
}

impl<K: LineSink> Drop for SinkGuard<'_, K> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.sink.release() {
            tracing::warn!(path = self.path, "Failed to release sink after error: {}", e);
        }
    }
}
