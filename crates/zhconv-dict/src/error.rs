//! Error types for lexicons and dictionary formats

use std::fmt;
use thiserror::Error;

/// Field of the binary dictionary layout, used to report where a read failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Entry count at the start of the file
    NumItems,
    /// Byte length of the key heap
    KeyHeapLength,
    /// Key heap bytes
    KeyHeap,
    /// Byte length of the value heap
    ValueHeapLength,
    /// Value heap bytes
    ValueHeap,
    /// Per-item value count
    NumValues,
    /// Per-item key offset
    KeyOffset,
    /// Per-item value offset
    ValueOffset,
}

impl Field {
    /// Name of the field as it appears in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::NumItems => "numItems",
            Self::KeyHeapLength => "keyHeapLength",
            Self::KeyHeap => "keyHeap",
            Self::ValueHeapLength => "valueHeapLength",
            Self::ValueHeap => "valueHeap",
            Self::NumValues => "numValues",
            Self::KeyOffset => "keyOffset",
            Self::ValueOffset => "valueOffset",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur when building, saving or loading dictionaries
#[derive(Debug, Error)]
pub enum DictError {
    /// A field could not be read in full
    #[error("invalid binary dictionary ({field})")]
    Truncated {
        /// Field that came up short
        field: Field,
    },

    /// An item record declares zero values
    #[error("invalid binary dictionary (numValues): item {item} has no values")]
    NoValues {
        /// Zero-based item index
        item: u32,
    },

    /// An offset points outside its heap
    #[error(
        "invalid binary dictionary ({field}): item {item} offset {offset} is outside a heap of {heap_length} bytes"
    )]
    OffsetOutOfBounds {
        /// Offending offset field
        field: Field,
        /// Zero-based item index
        item: u32,
        /// Offset read from the file
        offset: u32,
        /// Length of the heap the offset points into
        heap_length: usize,
    },

    /// An offset points at a string with no NUL terminator before the heap ends
    #[error(
        "invalid binary dictionary ({field}): item {item} string at offset {offset} is not NUL-terminated"
    )]
    MissingTerminator {
        /// Offending offset field
        field: Field,
        /// Zero-based item index
        item: u32,
        /// Offset read from the file
        offset: u32,
    },

    /// An entry was given no values
    #[error("Dictionary entry must have at least one value")]
    EmptyValues,

    /// A key or value contains a NUL byte, which the heap layout reserves
    #[error("Entry {index} has a {part} containing an embedded NUL byte")]
    EmbeddedNul {
        /// Zero-based entry index in the lexicon
        index: usize,
        /// "key" or "value"
        part: &'static str,
    },

    /// A heap would not fit a 32-bit length field
    #[error("{heap} heap of {length} bytes exceeds the 32-bit format limit")]
    HeapTooLarge {
        /// "key" or "value"
        heap: &'static str,
        /// Required heap length
        length: usize,
    },

    /// A count would not fit a 32-bit field
    #[error("{what} count {count} exceeds the 32-bit format limit")]
    TooManyItems {
        /// What was being counted
        what: &'static str,
        /// Actual count
        count: usize,
    },

    /// Malformed line in a text dictionary
    #[error("Invalid text dictionary line {line}: {reason}")]
    InvalidTextLine {
        /// One-based line number
        line: usize,
        /// What is wrong with the line
        reason: String,
    },

    /// A key or value would not survive being written as a text line
    #[error("Entry {index} has a {part} that cannot be written as text: {reason}")]
    NotRepresentableAsText {
        /// Zero-based entry index in the lexicon
        index: usize,
        /// "key" or "value"
        part: &'static str,
        /// Which separator rule it breaks
        reason: &'static str,
    },

    /// Text content is not valid UTF-8
    #[error("Dictionary text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(#[from] zhconv_storage::StorageError),

    /// Binary read error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// Binary write error
    #[error("Binary write error: {0}")]
    BinWrite(String),

    /// IO error during parsing or building
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DictError {
    /// Whether this error means the binary input is malformed
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. }
                | Self::NoValues { .. }
                | Self::OffsetOutOfBounds { .. }
                | Self::MissingTerminator { .. }
        )
    }

    /// Map a failed read of `field`, turning end-of-stream into [`DictError::Truncated`]
    pub(crate) fn from_read(err: binrw::Error, field: Field) -> Self {
        match err {
            binrw::Error::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::Truncated { field }
            }
            other => other.into(),
        }
    }
}

impl From<binrw::Error> for DictError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

/// Result type alias for dictionary operations
pub type Result<T> = std::result::Result<T, DictError>;
