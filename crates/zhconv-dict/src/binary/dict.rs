//! Binary dictionary load and save

use crate::binary::buffer::{PackedBuffers, construct_buffer};
use crate::binary::record::{FIELD_SIZE, ItemRecord, MIN_RECORD_SIZE, read_field, write_field};
use crate::error::{DictError, Field, Result};
use crate::lexicon::Lexicon;
use binrw::{BinWrite, Endian};
use bytes::Bytes;
use serde::Serialize;
use std::io::{Cursor, Read, Seek, Write};
use tracing::{debug, info};
use zhconv_storage::{AccessMode, SeekExt, StorageBackend};

/// A lexicon together with the heaps backing its view entries
///
/// Built with [`BinaryDict::new`] to save a lexicon, or produced by
/// [`BinaryDict::load_from`] when reading one. A loaded dictionary is
/// immutable; its entries are views that share the heaps by reference
/// count, so cloning the dictionary or its entries never copies strings.
#[derive(Debug, Clone, Default)]
pub struct BinaryDict {
    lexicon: Lexicon,
    key_heap: Bytes,
    value_heap: Bytes,
}

/// Summary figures for a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictStats {
    /// Number of entries
    pub num_items: usize,
    /// Number of values across all entries
    pub num_values: usize,
    /// Bytes the key heap occupies when serialized
    pub key_heap_length: usize,
    /// Bytes the value heap occupies when serialized
    pub value_heap_length: usize,
    /// Longest key in bytes
    pub key_max_length: usize,
}

impl BinaryDict {
    /// Wrap a lexicon for serialization
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            key_heap: Bytes::new(),
            value_heap: Bytes::new(),
        }
    }

    /// The entries
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Take the entries, which keep the heaps alive on their own
    pub fn into_lexicon(self) -> Lexicon {
        self.lexicon
    }

    /// Key heap read by the last load; empty for dictionaries built in memory
    pub fn key_heap(&self) -> &Bytes {
        &self.key_heap
    }

    /// Value heap read by the last load; empty for dictionaries built in memory
    pub fn value_heap(&self) -> &Bytes {
        &self.value_heap
    }

    /// Longest key in bytes
    pub fn key_max_length(&self) -> usize {
        self.lexicon.key_max_length()
    }

    /// Entry and heap figures
    pub fn stats(&self) -> DictStats {
        let mut stats = DictStats {
            num_items: self.lexicon.len(),
            num_values: 0,
            key_heap_length: 0,
            value_heap_length: 0,
            key_max_length: 0,
        };
        for entry in &self.lexicon {
            stats.num_values += entry.num_values();
            stats.key_heap_length += entry.key_len() + 1;
            stats.value_heap_length += entry.values().map(|v| v.len() + 1).sum::<usize>();
            stats.key_max_length = stats.key_max_length.max(entry.key_len());
        }
        stats
    }

    /// Pack the lexicon into key and value heaps with their offsets
    pub fn construct_buffer(&self) -> Result<PackedBuffers> {
        construct_buffer(&self.lexicon)
    }

    /// Serialize into a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let packed = self.construct_buffer()?;

        // One record per entry, value offsets taken in flattened order
        let mut values = packed.value_offsets.iter().copied();
        let records: Vec<ItemRecord> = self
            .lexicon
            .iter()
            .zip(&packed.key_offsets)
            .map(|(entry, &key_offset)| ItemRecord {
                key_offset,
                value_offsets: values.by_ref().take(entry.num_values()).collect(),
            })
            .collect();
        debug_assert!(values.next().is_none());

        let records_size: usize = records.iter().map(ItemRecord::serialized_size).sum();
        let header_size = 3 * FIELD_SIZE;
        let mut buffer = Vec::with_capacity(
            header_size + packed.key_heap.len() + packed.value_heap.len() + records_size,
        );
        let mut cursor = Cursor::new(&mut buffer);

        // Header and heaps
        write_field(&mut cursor, self.lexicon.len() as u32).map_err(write_error)?;
        write_field(&mut cursor, packed.key_heap_length).map_err(write_error)?;
        cursor.write_all(&packed.key_heap)?;
        write_field(&mut cursor, packed.value_heap_length).map_err(write_error)?;
        cursor.write_all(&packed.value_heap)?;

        for record in &records {
            record
                .write_options(&mut cursor, Endian::NATIVE, ())
                .map_err(write_error)?;
        }

        Ok(buffer)
    }

    /// Serialize to `writer`
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<()> {
        let data = self.to_bytes()?;
        writer.write_all(&data)?;
        debug!(
            "Serialized {} entries into {} bytes",
            self.lexicon.len(),
            data.len()
        );
        Ok(())
    }

    /// Serialize to the resource `name` of `backend`
    ///
    /// The resource is only opened once the lexicon has been packed, so a
    /// lexicon that cannot be serialized leaves an existing resource intact.
    pub fn save(&self, backend: &dyn StorageBackend, name: &str) -> Result<()> {
        let data = self.to_bytes()?;
        let mut stream = backend.open(name, AccessMode::Write)?;
        stream.write_all(&data)?;
        stream.close()?;
        info!("Saved binary dictionary {} ({} entries)", name, self.lexicon.len());
        Ok(())
    }

    /// Parse a dictionary from `reader`
    ///
    /// Either every field reads in full and every offset lands on a
    /// NUL-terminated string inside its heap, or an error is returned and
    /// nothing is produced. Heap lengths are checked against the bytes left
    /// in the stream before anything is allocated for them.
    pub fn load_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let num_items = read_field(reader, Field::NumItems)?;
        let key_heap = read_heap(reader, Field::KeyHeapLength, Field::KeyHeap)?;
        let value_heap = read_heap(reader, Field::ValueHeapLength, Field::ValueHeap)?;

        let room = reader.remaining()? / MIN_RECORD_SIZE as u64;
        let mut lexicon = Lexicon::with_capacity(u64::from(num_items).min(room) as usize);
        for item in 0..num_items {
            let record = ItemRecord::read_from(reader, item)?;
            lexicon.push(record.resolve(item, &key_heap, &value_heap)?);
        }

        let trailing = reader.remaining()?;
        if trailing > 0 {
            debug!("Ignoring {} trailing bytes after item records", trailing);
        }

        let dict = Self {
            lexicon,
            key_heap,
            value_heap,
        };
        debug!("Loaded binary dictionary: {:?}", dict.stats());
        Ok(dict)
    }

    /// Parse a dictionary held in memory
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::load_from(&mut Cursor::new(data))
    }

    /// Load the resource `name` of `backend`
    pub fn load(backend: &dyn StorageBackend, name: &str) -> Result<Self> {
        let mut stream = backend.open(name, AccessMode::Read)?;
        let dict = Self::load_from(&mut stream)?;
        stream.close()?;
        info!("Loaded binary dictionary {} ({} entries)", name, dict.lexicon.len());
        Ok(dict)
    }
}

impl PartialEq for BinaryDict {
    fn eq(&self, other: &Self) -> bool {
        self.lexicon == other.lexicon
    }
}

impl Eq for BinaryDict {}

impl From<Lexicon> for BinaryDict {
    fn from(lexicon: Lexicon) -> Self {
        Self::new(lexicon)
    }
}

impl crate::DictFormat for BinaryDict {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(data).map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        self.to_bytes()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }
}

fn write_error(e: binrw::Error) -> DictError {
    DictError::BinWrite(e.to_string())
}

fn read_heap<R: Read + Seek>(reader: &mut R, length_field: Field, heap_field: Field) -> Result<Bytes> {
    let length = read_field(reader, length_field)?;
    if u64::from(length) > reader.remaining()? {
        return Err(DictError::Truncated { field: heap_field });
    }
    let mut heap = vec![0u8; length as usize];
    reader
        .read_exact(&mut heap)
        .map_err(|e| DictError::from_read(binrw::Error::Io(e), heap_field))?;
    Ok(Bytes::from(heap))
}
