//! Filesystem-backed storage.

use crate::stream::{AccessMode, DataStream};
use crate::{Result, StorageBackend, StorageError};
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Backend that opens local files.
///
/// Relative names are resolved against `root` when one is configured,
/// otherwise against the process working directory.
#[derive(Debug, Clone, Default)]
pub struct FileSystemBackend {
    root: Option<PathBuf>,
}

impl FileSystemBackend {
    /// Create a backend resolving names against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend resolving names against `root`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
        }
    }

    /// Root directory, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolve a resource name to a filesystem path.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(match &self.root {
            Some(root) => root.join(name),
            None => PathBuf::from(name),
        })
    }
}

impl StorageBackend for FileSystemBackend {
    fn open(&self, name: &str, mode: AccessMode) -> Result<Box<dyn DataStream>> {
        let path = self.resolve(name)?;
        let file = match mode {
            AccessMode::Read => File::open(&path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
                _ => StorageError::Io(e),
            })?,
            AccessMode::Write => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                File::create(&path)?
            }
        };
        debug!("Opened {} in {:?} mode", path.display(), mode);
        Ok(Box::new(FileStream::new(file, mode)))
    }
}

/// Stream over a local file.
#[derive(Debug)]
pub struct FileStream {
    file: File,
    mode: AccessMode,
}

impl FileStream {
    /// Wrap an already opened file.
    pub const fn new(file: File, mode: AccessMode) -> Self {
        Self { file, mode }
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.mode.can_read() {
            return Err(self.mode.denied("read"));
        }
        self.file.read(buf)
    }
}

impl Write for FileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.mode.can_write() {
            return Err(self.mode.denied("write"));
        }
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for FileStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl DataStream for FileStream {
    fn mode(&self) -> AccessMode {
        self.mode
    }

    fn close(&mut self) -> Result<()> {
        if self.mode.can_write() {
            self.file.flush()?;
            self.file.sync_data()?;
        }
        Ok(())
    }
}
