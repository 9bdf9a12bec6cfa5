//! In-memory storage.
//!
//! Blobs live in a shared map keyed by resource name. Read streams get a
//! cheap reference-counted view of the blob; write streams buffer privately
//! and publish on [`close`](DataStream::close) or when dropped.

use crate::stream::{AccessMode, DataStream};
use crate::{Result, StorageBackend, StorageError};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::sync::Arc;
use tracing::debug;

type BlobMap = Arc<RwLock<HashMap<String, Bytes>>>;

/// Backend storing named blobs in memory.
///
/// Clones share the same map, so a clone handed to a codec sees what the
/// test inserted and vice versa.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blobs: BlobMap,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `name`, replacing any previous blob.
    pub fn insert(&self, name: impl Into<String>, data: impl Into<Bytes>) {
        self.blobs.write().insert(name.into(), data.into());
    }

    /// Get the blob stored under `name`.
    pub fn get(&self, name: &str) -> Option<Bytes> {
        self.blobs.read().get(name).cloned()
    }

    /// Remove and return the blob stored under `name`.
    pub fn remove(&self, name: &str) -> Option<Bytes> {
        self.blobs.write().remove(name)
    }

    /// Check if a blob is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.blobs.read().contains_key(name)
    }

    /// All stored names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blobs.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Check if no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn open(&self, name: &str, mode: AccessMode) -> Result<Box<dyn DataStream>> {
        if name.is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        let stream = match mode {
            AccessMode::Read => {
                let data = self
                    .get(name)
                    .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
                MemoryStream::reader(data)
            }
            AccessMode::Write => MemoryStream::writer(name.to_string(), self.blobs.clone()),
        };
        debug!("Opened in-memory blob {} in {:?} mode", name, mode);
        Ok(Box::new(stream))
    }
}

#[derive(Debug)]
enum Inner {
    Reader(Cursor<Bytes>),
    Writer {
        name: String,
        target: BlobMap,
        buffer: Cursor<Vec<u8>>,
    },
    Closed,
}

/// Stream over an in-memory blob.
#[derive(Debug)]
pub struct MemoryStream {
    mode: AccessMode,
    inner: Inner,
}

impl MemoryStream {
    /// Read stream over `data`, not attached to any backend.
    pub fn reader(data: impl Into<Bytes>) -> Self {
        Self {
            mode: AccessMode::Read,
            inner: Inner::Reader(Cursor::new(data.into())),
        }
    }

    fn writer(name: String, target: BlobMap) -> Self {
        Self {
            mode: AccessMode::Write,
            inner: Inner::Writer {
                name,
                target,
                buffer: Cursor::new(Vec::new()),
            },
        }
    }

    fn commit(&mut self) {
        if let Inner::Writer {
            name,
            target,
            buffer,
        } = std::mem::replace(&mut self.inner, Inner::Closed)
        {
            let data = buffer.into_inner();
            debug!("Committing {} bytes to in-memory blob {}", data.len(), name);
            target.write().insert(name, Bytes::from(data));
        }
    }

    fn closed() -> io::Error {
        io::Error::other("stream is closed")
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Reader(cursor) => cursor.read(buf),
            Inner::Writer { .. } => Err(self.mode.denied("read")),
            Inner::Closed => Err(Self::closed()),
        }
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Writer { buffer, .. } => buffer.write(buf),
            Inner::Reader(_) => Err(self.mode.denied("write")),
            Inner::Closed => Err(Self::closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.inner {
            Inner::Reader(cursor) => cursor.seek(pos),
            Inner::Writer { buffer, .. } => buffer.seek(pos),
            Inner::Closed => Err(Self::closed()),
        }
    }
}

impl DataStream for MemoryStream {
    fn mode(&self) -> AccessMode {
        self.mode
    }

    fn close(&mut self) -> Result<()> {
        self.commit();
        self.inner = Inner::Closed;
        Ok(())
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        self.commit();
    }
}
