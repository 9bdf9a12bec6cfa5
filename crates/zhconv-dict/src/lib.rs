//! Lexicon model and binary dictionary codec for dictionary-driven text conversion
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format fields
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Many format field names don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::derive_partial_eq_without_eq)] // Binary format structs
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! A conversion engine (Simplified to Traditional Chinese, regional variants
//! and so on) substitutes the longest matching key it finds in a lexicon.
//! This crate provides the lexicon itself and the two formats it is stored in:
//!
//! - **Binary**: two NUL-terminated string heaps plus an offset table, loaded
//!   without any text parsing. Loaded entries are views sharing the heaps.
//! - **Text**: one `key<TAB>value value ...` line per entry, the human
//!   editable source form.
//!
//! Both formats read and write through a
//! [`StorageBackend`](zhconv_storage::StorageBackend) passed by the caller.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Order Preservation**: Entries keep their position and value order
//! - **Untrusted Input**: Every length and offset read from a file is checked
//!   before use
//! - **Round-Trip Guarantee**: parse(build(data)) == data

#![warn(missing_docs)]

/// Binary dictionary format (heaps plus offset records)
///
/// See the [`binary`] module for the byte layout and usage examples.
pub mod binary;
pub mod entry;
pub mod error;
pub mod lexicon;
pub mod text;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use binary::{BinaryDict, DictStats, PackedBuffers};
pub use entry::{DictEntry, Values};
pub use error::{DictError, Field, Result};
pub use lexicon::Lexicon;
pub use text::TextDict;

/// Common format trait that all dictionary formats implement
pub trait DictFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>>;

    /// Build to bytes
    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>>;

    /// Verify round-trip correctness
    fn verify_round_trip(data: &[u8]) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            return Err("Round-trip verification failed".into());
        }
        Ok(())
    }
}
