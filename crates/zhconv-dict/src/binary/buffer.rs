//! Packing a lexicon into key and value heaps

use crate::entry::DictEntry;
use crate::error::{DictError, Result};
use crate::lexicon::Lexicon;

/// Lexicon packed into two NUL-terminated string heaps plus offsets
///
/// `key_offsets` has one offset per entry. `value_offsets` is flattened:
/// all values of entry 0, then all values of entry 1, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBuffers {
    /// Concatenated NUL-terminated keys
    pub key_heap: Vec<u8>,
    /// Start of each entry's key in `key_heap`
    pub key_offsets: Vec<u32>,
    /// Total length of `key_heap`
    pub key_heap_length: u32,
    /// Concatenated NUL-terminated values
    pub value_heap: Vec<u8>,
    /// Start of each value in `value_heap`, in lexicon then value order
    pub value_offsets: Vec<u32>,
    /// Total length of `value_heap`
    pub value_heap_length: u32,
}

fn check_no_nul(bytes: &[u8], index: usize, part: &'static str) -> Result<()> {
    if bytes.contains(&0) {
        return Err(DictError::EmbeddedNul { index, part });
    }
    Ok(())
}

fn heap_length(total: usize, heap: &'static str) -> Result<u32> {
    u32::try_from(total).map_err(|_| DictError::HeapTooLarge {
        heap,
        length: total,
    })
}

/// Pack `lexicon` into heaps sized exactly in a first pass
pub fn construct_buffer(lexicon: &Lexicon) -> Result<PackedBuffers> {
    if u32::try_from(lexicon.len()).is_err() {
        return Err(DictError::TooManyItems {
            what: "entry",
            count: lexicon.len(),
        });
    }

    // Pass 1: sizes, plus one terminator per string
    let mut key_total = 0usize;
    let mut value_total = 0usize;
    let mut value_count = 0usize;
    for (index, entry) in lexicon.iter().enumerate() {
        debug_assert!(entry.num_values() >= 1);
        if u32::try_from(entry.num_values()).is_err() {
            return Err(DictError::TooManyItems {
                what: "value",
                count: entry.num_values(),
            });
        }
        check_no_nul(entry.key(), index, "key")?;
        key_total += entry.key_len() + 1;
        for value in entry.values() {
            check_no_nul(value, index, "value")?;
            value_total += value.len() + 1;
        }
        value_count += entry.num_values();
    }
    let key_heap_length = heap_length(key_total, "key")?;
    let value_heap_length = heap_length(value_total, "value")?;

    // Pass 2: copy strings, recording where each one starts
    let mut packed = PackedBuffers {
        key_heap: Vec::with_capacity(key_total),
        key_offsets: Vec::with_capacity(lexicon.len()),
        key_heap_length,
        value_heap: Vec::with_capacity(value_total),
        value_offsets: Vec::with_capacity(value_count),
        value_heap_length,
    };
    for entry in lexicon {
        packed.push_entry(entry);
    }

    debug_assert_eq!(packed.key_heap.len(), key_total);
    debug_assert_eq!(packed.value_heap.len(), value_total);
    Ok(packed)
}

impl PackedBuffers {
    fn push_entry(&mut self, entry: &DictEntry) {
        // Heap lengths were checked against u32 in the sizing pass
        self.key_offsets.push(self.key_heap.len() as u32);
        self.key_heap.extend_from_slice(entry.key());
        self.key_heap.push(0);
        for value in entry.values() {
            self.value_offsets.push(self.value_heap.len() as u32);
            self.value_heap.extend_from_slice(value);
            self.value_heap.push(0);
        }
    }
}
