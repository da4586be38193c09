//! In-memory filesystem implementation for testing
//!
//! This module provides `MemoryFS`, a fake filesystem that stores directories
//! and file contents in memory. It's used for hermetic testing without touching
//! the real filesystem.

use super::{DirectoryManager, FilesystemError, LINE_ENDING, LineSink, LineStreamFactory};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct State {
    directories: HashSet<PathBuf>,
    files: HashMap<PathBuf, Vec<u8>>,
}

/// In-memory filesystem for testing
///
/// Opening a file requires its parent directory to have been created first,
/// the same way a real filesystem would. Clones share the same storage.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryFS {
    state: Arc<RwLock<State>>,
}

#[allow(dead_code)]
impl MemoryFS {
    /// Create a new empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file back as a string
    pub fn read_to_string(&self, path: &str) -> Result<String, FilesystemError> {
        let state = self.state.read().map_err(|_| FilesystemError::LockError)?;
        let bytes = state
            .files
            .get(Path::new(path))
            .ok_or_else(|| FilesystemError::io(path, std::io::ErrorKind::NotFound.into()))?;
        String::from_utf8(bytes.clone()).map_err(|e| {
            FilesystemError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    /// Check if a directory was created
    pub fn directory_exists(&self, path: &str) -> bool {
        self.state
            .read()
            .map(|state| state.directories.contains(Path::new(path)))
            .unwrap_or(false)
    }

    /// Check if a file exists
    pub fn file_exists(&self, path: &str) -> bool {
        self.state
            .read()
            .map(|state| state.files.contains_key(Path::new(path)))
            .unwrap_or(false)
    }

    /// Number of files stored
    pub fn file_count(&self) -> usize {
        self.state.read().map(|state| state.files.len()).unwrap_or(0)
    }
}

impl DirectoryManager for MemoryFS {
    fn create_directory(&self, path: &str) -> Result<(), FilesystemError> {
        let mut state = self.state.write().map_err(|_| FilesystemError::LockError)?;
        for ancestor in Path::new(path).ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            state.directories.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}

impl LineStreamFactory for MemoryFS {
    type Sink = MemorySink;

    fn open_for_writing(&self, path: &str) -> Result<MemorySink, FilesystemError> {
        let mut state = self.state.write().map_err(|_| FilesystemError::LockError)?;
        let file_path = PathBuf::from(path);

        let parent_missing = file_path.parent().is_some_and(|parent| {
            !parent.as_os_str().is_empty() && !state.directories.contains(parent)
        });
        if parent_missing {
            return Err(FilesystemError::io(path, std::io::ErrorKind::NotFound.into()));
        }

        state.files.insert(file_path.clone(), Vec::new());
        Ok(MemorySink {
            state: Arc::clone(&self.state),
            path: file_path,
            buffer: Vec::new(),
            released: false,
        })
    }
}

/// Line sink that buffers writes and stores them in `MemoryFS` on release
#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct MemorySink {
    state: Arc<RwLock<State>>,
    path: PathBuf,
    buffer: Vec<u8>,
    released: bool,
}

impl LineSink for MemorySink {
    fn write_line(&mut self, text: &str) -> Result<(), FilesystemError> {
        if self.released {
            return Err(FilesystemError::AlreadyReleased {
                path: self.path.clone(),
            });
        }
        self.buffer.extend_from_slice(text.as_bytes());
        self.buffer.extend_from_slice(LINE_ENDING.as_bytes());
        Ok(())
    }

    fn release(&mut self) -> Result<(), FilesystemError> {
        if self.released {
            return Err(FilesystemError::AlreadyReleased {
                path: self.path.clone(),
            });
        }
        self.released = true;
        let mut state = self.state.write().map_err(|_| FilesystemError::LockError)?;
        state
            .files
            .insert(self.path.clone(), std::mem::take(&mut self.buffer));
        Ok(())
    }
}
