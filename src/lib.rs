//! File creator - write line-based text files into a directory
//!
//! This library configures an optional output directory, creating it when
//! needed, and writes sequences of lines to files inside it. It's built using
//! hexagonal architecture with dependency injection for testability.
//!
//! # Architecture
//!
//! - **Ports** (abstract interfaces): `DirectoryManager`, `LineStreamFactory`
//!   and `LineSink` traits
//! - **Adapters** (concrete implementations):
//!   - Production: `PhysicalFS`
//!   - Testing: `MemoryFS`, `RecordingFS`
//! - **Functional Core**: `FileWriter` depends only on trait abstractions
//!
//! # Example
//!
//! ```rust,no_run
//! use file_creator::FileWriter;
//!
//! let mut writer = FileWriter::physical();
//! writer.set_directory("out")?;
//!
//! // Writes "out/a.txt" with two lines
//! writer.create_file("a.txt", &["x", "y"])?;
//!
//! // Paths are joined literally with "/"
//! assert_eq!(writer.file_path("b.txt"), "out/b.txt");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod execute;
pub mod filesystem;
pub mod writer;

// Re-export commonly used types
pub use execute::{CreateRequest, ExecuteError, execute};
pub use filesystem::FilesystemError;
pub use writer::{FileCreator, FileWriter, FileWriterError};

#[cfg(test)]
mod integration_tests;
