//! Physical filesystem implementation
//!
//! This module provides `PhysicalFS`, which uses the real OS filesystem.
//! This is the production adapter used by the CLI.

use super::{DirectoryManager, FilesystemError, LINE_ENDING, LineSink, LineStreamFactory};
use std::fs;
use std::io::{BufWriter, Write};

/// Physical filesystem adapter
///
/// Directories are created with `std::fs::create_dir_all`, which is a no-op
/// for directories that already exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalFS;

impl PhysicalFS {
    /// Create a new `PhysicalFS` instance
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryManager for PhysicalFS {
    fn create_directory(&self, path: &str) -> Result<(), FilesystemError> {
        fs::create_dir_all(path).map_err(|e| FilesystemError::io(path, e))
    }
}

impl LineStreamFactory for PhysicalFS {
    type Sink = FileSink;

    fn open_for_writing(&self, path: &str) -> Result<FileSink, FilesystemError> {
        let file = fs::File::create(path).map_err(|e| FilesystemError::io(path, e))?;
        Ok(FileSink {
            path: path.to_string(),
            writer: Some(BufWriter::new(file)),
        })
    }
}

/// Buffered line sink over a created file
#[derive(Debug)]
pub struct FileSink {
    path: String,
    writer: Option<BufWriter<fs::File>>,
}

impl FileSink {
    fn writer(&mut self) -> Result<&mut BufWriter<fs::File>, FilesystemError> {
        self.writer
            .as_mut()
            .ok_or_else(|| FilesystemError::AlreadyReleased {
                path: self.path.clone().into(),
            })
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, text: &str) -> Result<(), FilesystemError> {
        let path = self.path.clone();
        let writer = self.writer()?;
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.write_all(LINE_ENDING.as_bytes()))
            .map_err(|e| FilesystemError::io(&path, e))
    }

    fn release(&mut self) -> Result<(), FilesystemError> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| FilesystemError::AlreadyReleased {
                path: self.path.clone().into(),
            })?;
        // Dropping the file afterwards closes the handle
        writer
            .flush()
            .map_err(|e| FilesystemError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_directory_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested/out");
        let dir = dir.to_str().unwrap();

        let fs = PhysicalFS::new();
        fs.create_directory(dir).unwrap();
        fs.create_directory(dir).unwrap();

        assert!(std::path::Path::new(dir).is_dir());
    }

    #[test]
    fn test_open_truncates_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "old content that is longer\n").unwrap();
        let file = file.to_str().unwrap();

        let mut sink = PhysicalFS.open_for_writing(file).unwrap();
        sink.write_line("new").unwrap();
        sink.release().unwrap();

        assert_eq!(
            std::fs::read_to_string(file).unwrap(),
            format!("new{LINE_ENDING}")
        );
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("missing/a.txt");
        let file = file.to_str().unwrap();

        let err = PhysicalFS.open_for_writing(file).unwrap_err();
        assert!(matches!(err, FilesystemError::Io { .. }));
    }

    #[test]
    fn test_write_after_release_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        let file = file.to_str().unwrap();

        let mut sink = PhysicalFS.open_for_writing(file).unwrap();
        sink.release().unwrap();

        assert!(matches!(
            sink.write_line("late"),
            Err(FilesystemError::AlreadyReleased { .. })
        ));
        assert!(matches!(
            sink.release(),
            Err(FilesystemError::AlreadyReleased { .. })
        ));
    }
}
