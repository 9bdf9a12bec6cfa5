//! Storage backend trait.
//!
//! Backends are passed explicitly to whoever needs to open a resource. There
//! is no process-wide current backend; tests hand a [`MemoryBackend`] where
//! production code hands a [`FileSystemBackend`].
//!
//! [`MemoryBackend`]: crate::MemoryBackend
//! [`FileSystemBackend`]: crate::FileSystemBackend

use crate::Result;
use crate::stream::{AccessMode, DataStream};

/// Source of byte streams for named resources.
pub trait StorageBackend: Send + Sync {
    /// Open `name` with the given access mode.
    ///
    /// Opening a missing resource for reading fails with
    /// [`StorageError::NotFound`](crate::StorageError::NotFound).
    fn open(&self, name: &str, mode: AccessMode) -> Result<Box<dyn DataStream>>;

    /// Check whether `name` can be opened for reading.
    ///
    /// The default implementation probes with [`open`](Self::open) and closes
    /// the stream immediately.
    fn exists(&self, name: &str) -> bool {
        self.open(name, AccessMode::Read)
            .and_then(|mut stream| stream.close())
            .is_ok()
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn open(&self, name: &str, mode: AccessMode) -> Result<Box<dyn DataStream>> {
        (**self).open(name, mode)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<T> {
    fn open(&self, name: &str, mode: AccessMode) -> Result<Box<dyn DataStream>> {
        (**self).open(name, mode)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}
