//! Stream trait shared by every storage backend.

use crate::Result;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Access mode requested when opening a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Open an existing resource for reading.
    Read,
    /// Create or truncate a resource for writing.
    Write,
}

impl AccessMode {
    /// Check if this mode allows reads.
    pub const fn can_read(self) -> bool {
        matches!(self, Self::Read)
    }

    /// Check if this mode allows writes.
    pub const fn can_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Error returned when a stream is used against its mode.
    pub(crate) fn denied(self, op: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("cannot {op} a stream opened in {self:?} mode"),
        )
    }
}

/// Sequential access to a named resource produced by a [`StorageBackend`].
///
/// Reads report how many bytes were actually transferred through the usual
/// [`Read`] contract, so a consumer that needs an exact count uses
/// [`Read::read_exact`] and treats `UnexpectedEof` as a short read.
///
/// Streams are seekable so a reader can learn how much data remains before
/// trusting lengths it finds in a header.
///
/// [`StorageBackend`]: crate::StorageBackend
pub trait DataStream: Read + Write + Seek + Send {
    /// Mode the stream was opened with.
    fn mode(&self) -> AccessMode;

    /// Flush and release the stream.
    ///
    /// Write-mode streams make their contents visible to later `open` calls
    /// no later than this point. Calling `close` twice is harmless.
    fn close(&mut self) -> Result<()>;
}

/// Extension for any seekable source, streams from a backend included.
pub trait SeekExt: Seek {
    /// Number of bytes between the current position and the end.
    ///
    /// The position is left where it was.
    fn remaining(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(pos))?;
        Ok(end.saturating_sub(pos))
    }
}

impl<S: Seek + ?Sized> SeekExt for S {}
