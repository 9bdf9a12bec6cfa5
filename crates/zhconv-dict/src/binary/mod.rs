//! Binary dictionary format
//!
//! A binary dictionary stores a lexicon as two string heaps followed by one
//! offset record per entry, so loading it needs no text parsing.
//!
//! # Format Overview
//!
//! - No magic, version or checksum
//! - All counts, lengths and offsets: `u32` in native byte order
//! - Heaps: NUL-terminated strings back to back, addressed by byte offset
//!
//! ```text
//! numItems            u32
//! keyHeapLength       u32
//! keyHeap             [u8; keyHeapLength]
//! valueHeapLength     u32
//! valueHeap           [u8; valueHeapLength]
//! numItems times:
//!     numValues       u32      (>= 1)
//!     keyOffset       u32      (into keyHeap)
//!     valueOffset     [u32; numValues]  (into valueHeap)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use zhconv_dict::{BinaryDict, DictEntry, Lexicon};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut lexicon = Lexicon::new();
//! lexicon.push(DictEntry::single("你好", "hello"));
//! lexicon.push(DictEntry::new("世界", ["world", "earth"])?);
//!
//! // Serialize to bytes
//! let data = BinaryDict::new(lexicon).to_bytes()?;
//!
//! // Parse from bytes
//! let dict = BinaryDict::from_bytes(&data)?;
//! assert_eq!(dict.lexicon().len(), 2);
//! assert_eq!(dict.key_max_length(), 6);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod dict;
pub mod record;

// Re-export main types
pub use buffer::{PackedBuffers, construct_buffer};
pub use dict::{BinaryDict, DictStats};
pub use record::ItemRecord;
