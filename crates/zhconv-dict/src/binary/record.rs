//! Fixed-width fields and per-item records of the binary layout
//!
//! Every count, length and offset is a `u32` in native byte order.

use crate::entry::DictEntry;
use crate::error::{DictError, Field, Result};
use binrw::{BinRead, BinResult, BinWrite, Endian};
use bytes::Bytes;
use std::io::{Read, Seek, Write};

/// Size of one count/length/offset field
pub const FIELD_SIZE: usize = 4;

/// Smallest possible item record: `numValues`, `keyOffset`, one value offset
pub const MIN_RECORD_SIZE: usize = 3 * FIELD_SIZE;

/// Read one `u32` field, reporting a short read against `field`
pub fn read_field<R: Read + Seek>(reader: &mut R, field: Field) -> Result<u32> {
    u32::read_options(reader, Endian::NATIVE, ()).map_err(|e| DictError::from_read(e, field))
}

/// Write one `u32` field
pub fn write_field<W: Write + Seek>(writer: &mut W, value: u32) -> BinResult<()> {
    value.write_options(writer, Endian::NATIVE, ())
}

/// Offsets describing one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Offset of the key in the key heap
    pub key_offset: u32,
    /// Offsets of the values in the value heap, in order
    pub value_offsets: Vec<u32>,
}

impl ItemRecord {
    /// Number of values as written to the `numValues` field
    pub fn num_values(&self) -> u32 {
        self.value_offsets.len() as u32
    }

    /// Serialized size of this record
    pub fn serialized_size(&self) -> usize {
        (2 + self.value_offsets.len()) * FIELD_SIZE
    }

    /// Read the record of item `item`
    pub fn read_from<R: Read + Seek>(reader: &mut R, item: u32) -> Result<Self> {
        let num_values = read_field(reader, Field::NumValues)?;
        if num_values == 0 {
            return Err(DictError::NoValues { item });
        }
        let key_offset = read_field(reader, Field::KeyOffset)?;

        // num_values comes from the file; let the vector grow as reads succeed
        let mut value_offsets = Vec::with_capacity(num_values.min(16) as usize);
        for _ in 0..num_values {
            value_offsets.push(read_field(reader, Field::ValueOffset)?);
        }

        Ok(Self {
            key_offset,
            value_offsets,
        })
    }

    /// Build a view entry from this record's offsets into the two heaps
    pub fn resolve(&self, item: u32, key_heap: &Bytes, value_heap: &Bytes) -> Result<DictEntry> {
        let key = heap_string(key_heap, self.key_offset, Field::KeyOffset, item)?;
        let values = self
            .value_offsets
            .iter()
            .map(|&offset| heap_string(value_heap, offset, Field::ValueOffset, item))
            .collect::<Result<Vec<_>>>()?;
        DictEntry::view(key, values)
    }
}

impl BinWrite for ItemRecord {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        (): Self::Args<'_>,
    ) -> BinResult<()> {
        self.num_values().write_options(writer, endian, ())?;
        self.key_offset.write_options(writer, endian, ())?;
        for offset in &self.value_offsets {
            offset.write_options(writer, endian, ())?;
        }
        Ok(())
    }
}

/// Slice the NUL-terminated string starting at `offset`, without the terminator
fn heap_string(heap: &Bytes, offset: u32, field: Field, item: u32) -> Result<Bytes> {
    let start = offset as usize;
    if start >= heap.len() {
        return Err(DictError::OffsetOutOfBounds {
            field,
            item,
            offset,
            heap_length: heap.len(),
        });
    }
    let len = heap[start..]
        .iter()
        .position(|&b| b == 0)
        .ok_or(DictError::MissingTerminator {
            field,
            item,
            offset,
        })?;
    Ok(heap.slice(start..start + len))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_utils::ne_words;
    use binrw::io::Cursor;

    #[test]
    fn test_record_write_layout() {
        let record = ItemRecord {
            key_offset: 7,
            value_offsets: vec![6, 12],
        };
        let mut cursor = Cursor::new(Vec::new());
        record
            .write_options(&mut cursor, Endian::NATIVE, ())
            .unwrap();
        assert_eq!(cursor.into_inner(), ne_words(&[2, 7, 6, 12]));
        assert_eq!(record.serialized_size(), 16);
    }

    #[test]
    fn test_record_read() {
        let mut cursor = Cursor::new(ne_words(&[2, 7, 6, 12]));
        let record = ItemRecord::read_from(&mut cursor, 1).unwrap();
        assert_eq!(record.key_offset, 7);
        assert_eq!(record.value_offsets, vec![6, 12]);
        assert_eq!(record.num_values(), 2);
    }

    #[test]
    fn test_record_read_reports_short_field() {
        let cases: [(&[u32], Field); 3] = [
            (&[], Field::NumValues),
            (&[2], Field::KeyOffset),
            (&[2, 7, 6], Field::ValueOffset),
        ];
        for (words, expected) in cases {
            let mut cursor = Cursor::new(ne_words(words));
            match ItemRecord::read_from(&mut cursor, 0) {
                Err(DictError::Truncated { field }) => assert_eq!(field, expected),
                other => panic!("expected truncation at {expected}, got {other:?}"),
            }
        }

        // Half a field is still a short read
        let mut cursor = Cursor::new(vec![1u8, 0]);
        assert!(matches!(
            ItemRecord::read_from(&mut cursor, 0),
            Err(DictError::Truncated {
                field: Field::NumValues
            })
        ));
    }

    #[test]
    fn test_record_without_values_is_rejected() {
        let mut cursor = Cursor::new(ne_words(&[0, 0]));
        assert!(matches!(
            ItemRecord::read_from(&mut cursor, 5),
            Err(DictError::NoValues { item: 5 })
        ));
    }

    #[test]
    fn test_huge_value_count_does_not_preallocate() {
        let mut cursor = Cursor::new(ne_words(&[u32::MAX, 0, 0]));
        assert!(matches!(
            ItemRecord::read_from(&mut cursor, 0),
            Err(DictError::Truncated {
                field: Field::ValueOffset
            })
        ));
    }

    #[test]
    fn test_resolve_checks_offsets() {
        let keys = Bytes::from_static(b"ab\0cd\0");
        let values = Bytes::from_static(b"x\0yz");

        let ok = ItemRecord {
            key_offset: 3,
            value_offsets: vec![0, 1],
        };
        let entry = ok.resolve(0, &keys, &values).unwrap();
        assert_eq!(entry.key(), b"cd");
        assert_eq!(entry.value(0), Some(&b"x"[..]));
        // Offset 1 is the terminator of "x": an empty string
        assert_eq!(entry.value(1), Some(&b""[..]));

        let out_of_bounds = ItemRecord {
            key_offset: 6,
            value_offsets: vec![0],
        };
        assert!(matches!(
            out_of_bounds.resolve(2, &keys, &values),
            Err(DictError::OffsetOutOfBounds {
                field: Field::KeyOffset,
                item: 2,
                offset: 6,
                heap_length: 6
            })
        ));

        let unterminated = ItemRecord {
            key_offset: 0,
            value_offsets: vec![2],
        };
        assert!(matches!(
            unterminated.resolve(3, &keys, &values),
            Err(DictError::MissingTerminator {
                field: Field::ValueOffset,
                item: 3,
                offset: 2
            })
        ));
    }
}
