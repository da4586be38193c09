//! Recording filesystem double for testing
//!
//! `RecordingFS` logs every collaborator call in order and can be told to fail
//! at a given point. This lets tests assert exactly which calls `FileWriter`
//! makes without depending on any storage behavior.

use super::{DirectoryManager, FilesystemError, LineSink, LineStreamFactory};
use std::sync::{Arc, Mutex};

/// A call made against `RecordingFS` or one of its sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    CreateDirectory(String),
    Open(String),
    WriteLine(String),
    Release,
}

#[derive(Debug, Default)]
struct Failures {
    create_directory: bool,
    open: bool,
    /// Zero-based index of the write call that fails
    write_at: Option<usize>,
    release: bool,
}

/// Stub filesystem for testing
///
/// Clones share the same event log, so a clone can be handed to a `FileWriter`
/// while the test keeps another for assertions.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingFS {
    events: Arc<Mutex<Vec<Event>>>,
    failures: Arc<Mutex<Failures>>,
}

#[allow(dead_code)]
impl RecordingFS {
    /// Create a new recorder that never fails
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in call order
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Count events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().into_iter().filter(|e| predicate(e)).count()
    }

    /// Make every `create_directory` call fail
    pub fn fail_create_directory(&self) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.create_directory = true;
        }
    }

    /// Make every `open_for_writing` call fail
    pub fn fail_open(&self) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.open = true;
        }
    }

    /// Make the `index`-th write (zero-based, counted per sink) fail
    pub fn fail_write_at(&self, index: usize) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.write_at = Some(index);
        }
    }

    /// Make every `release` call fail
    pub fn fail_release(&self) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.release = true;
        }
    }

    fn record(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn check(
        &self,
        failing: impl Fn(&Failures) -> bool,
        message: &str,
    ) -> Result<(), FilesystemError> {
        let failures = self.failures.lock().map_err(|_| FilesystemError::LockError)?;
        if failing(&*failures) {
            return Err(FilesystemError::Injected {
                message: message.to_string(),
            });
        }
        Ok(())
    }
}

impl DirectoryManager for RecordingFS {
    fn create_directory(&self, path: &str) -> Result<(), FilesystemError> {
        self.record(Event::CreateDirectory(path.to_string()));
        self.check(|f| f.create_directory, "create_directory failed")
    }
}

impl LineStreamFactory for RecordingFS {
    type Sink = RecordingSink;

    fn open_for_writing(&self, path: &str) -> Result<RecordingSink, FilesystemError> {
        self.record(Event::Open(path.to_string()));
        self.check(|f| f.open, "open failed")?;
        Ok(RecordingSink {
            fs: self.clone(),
            writes: 0,
        })
    }
}

/// Sink that reports its calls back to the owning `RecordingFS`
#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct RecordingSink {
    fs: RecordingFS,
    writes: usize,
}

impl LineSink for RecordingSink {
    fn write_line(&mut self, text: &str) -> Result<(), FilesystemError> {
        self.fs.record(Event::WriteLine(text.to_string()));
        let index = self.writes;
        self.writes += 1;
        self.fs
            .check(|f| f.write_at == Some(index), "write_line failed")
    }

    fn release(&mut self) -> Result<(), FilesystemError> {
        self.fs.record(Event::Release);
        self.fs.check(|f| f.release, "release failed")
    }
}
