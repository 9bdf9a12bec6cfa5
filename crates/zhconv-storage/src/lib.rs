//! Byte-stream storage backends for zhconv dictionaries.
//!
//! Dictionary codecs never touch the filesystem directly. They receive a
//! [`StorageBackend`] and ask it to [`open`](StorageBackend::open) a named
//! resource, getting back a [`DataStream`] they can read from or write to.
//! Swapping the backend swaps where dictionaries live:
//!
//! - [`FileSystemBackend`]: local files, optionally resolved against a root
//!   directory
//! - [`MemoryBackend`]: named in-memory blobs, used for embedded resources
//!   and as a test double
//!
//! # Example
//!
//! ```rust
//! use std::io::{Read, Write};
//! use zhconv_storage::{AccessMode, MemoryBackend, StorageBackend};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = MemoryBackend::new();
//!
//! let mut out = backend.open("STCharacters.ocd2", AccessMode::Write)?;
//! out.write_all(b"payload")?;
//! out.close()?;
//!
//! assert!(backend.exists("STCharacters.ocd2"));
//!
//! let mut input = backend.open("STCharacters.ocd2", AccessMode::Read)?;
//! let mut data = Vec::new();
//! input.read_to_end(&mut data)?;
//! assert_eq!(data, b"payload");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use thiserror::Error;

pub mod backend;
pub mod fs;
pub mod memory;
pub mod stream;

pub use backend::StorageBackend;
pub use fs::{FileStream, FileSystemBackend};
pub use memory::{MemoryBackend, MemoryStream};
pub use stream::{AccessMode, DataStream, SeekExt};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while opening or closing storage streams.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The named resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource name cannot be resolved by this backend.
    #[error("Invalid resource name: {0:?}")]
    InvalidName(String),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
