//! Dictionary entries
//!
//! An entry maps one key to one or more values. Entries built from text own
//! their strings; entries loaded from a binary dictionary are views holding
//! reference-counted slices of the dictionary's key and value heaps, so they
//! stay valid for as long as any of them is alive.

use crate::error::{DictError, Result};
use bytes::Bytes;
use std::fmt;
use std::iter::FusedIterator;

/// Owning entry with exactly one value
#[derive(Debug, Clone)]
pub struct SingleValueEntry {
    key: Vec<u8>,
    value: Vec<u8>,
}

/// Owning entry with two or more values
#[derive(Debug, Clone)]
pub struct MultiValueEntry {
    key: Vec<u8>,
    values: Vec<Vec<u8>>,
}

/// Entry whose key and values are slices of shared heaps
#[derive(Debug, Clone)]
pub struct ViewEntry {
    key: Bytes,
    values: Vec<Bytes>,
}

/// One key and its ordered values
///
/// Every variant holds at least one value; the constructors refuse to build
/// an entry without one.
#[derive(Debug, Clone)]
pub enum DictEntry {
    /// Owns a key and a single value
    Single(SingleValueEntry),
    /// Owns a key and several values
    Multi(MultiValueEntry),
    /// Borrows key and values from shared heaps
    View(ViewEntry),
}

impl DictEntry {
    /// Create an owning entry with one value
    pub fn single(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self::Single(SingleValueEntry {
            key: key.into(),
            value: value.into(),
        })
    }

    /// Create an owning entry, picking the variant from the number of values
    pub fn new<K, V>(key: K, values: impl IntoIterator<Item = V>) -> Result<Self>
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        let key = key.into();
        let mut values: Vec<Vec<u8>> = values.into_iter().map(Into::into).collect();
        match values.len() {
            0 => Err(DictError::EmptyValues),
            1 => Ok(Self::Single(SingleValueEntry {
                key,
                value: values.swap_remove(0),
            })),
            _ => Ok(Self::Multi(MultiValueEntry { key, values })),
        }
    }

    /// Create a view entry over slices of shared heaps
    pub fn view(key: Bytes, values: Vec<Bytes>) -> Result<Self> {
        if values.is_empty() {
            return Err(DictError::EmptyValues);
        }
        Ok(Self::View(ViewEntry { key, values }))
    }

    /// Key bytes
    pub fn key(&self) -> &[u8] {
        match self {
            Self::Single(e) => &e.key,
            Self::Multi(e) => &e.key,
            Self::View(e) => &e.key,
        }
    }

    /// Key length in bytes
    pub fn key_len(&self) -> usize {
        self.key().len()
    }

    /// Key as UTF-8, if it is valid UTF-8
    pub fn key_str(&self) -> Option<&str> {
        std::str::from_utf8(self.key()).ok()
    }

    /// Number of values (always at least one)
    pub fn num_values(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(e) => e.values.len(),
            Self::View(e) => e.values.len(),
        }
    }

    /// Value at `index`
    pub fn value(&self, index: usize) -> Option<&[u8]> {
        match self {
            Self::Single(e) => (index == 0).then_some(e.value.as_slice()),
            Self::Multi(e) => e.values.get(index).map(Vec::as_slice),
            Self::View(e) => e.values.get(index).map(Bytes::as_ref),
        }
    }

    /// First value, the default conversion for the key
    pub fn first_value(&self) -> &[u8] {
        match self {
            Self::Single(e) => &e.value,
            Self::Multi(e) => &e.values[0],
            Self::View(e) => &e.values[0],
        }
    }

    /// Values in order
    pub fn values(&self) -> Values<'_> {
        let inner = match self {
            Self::Single(e) => ValuesInner::One(Some(&e.value)),
            Self::Multi(e) => ValuesInner::Owned(e.values.iter()),
            Self::View(e) => ValuesInner::Shared(e.values.iter()),
        };
        Values { inner }
    }

    /// Whether this entry borrows from shared heaps
    pub const fn is_view(&self) -> bool {
        matches!(self, Self::View(_))
    }

    /// Copy a view into an owning entry; owning entries are cloned
    pub fn to_owned_entry(&self) -> Self {
        match self {
            Self::View(e) if e.values.len() == 1 => {
                Self::single(e.key.to_vec(), e.values[0].to_vec())
            }
            Self::View(e) => Self::Multi(MultiValueEntry {
                key: e.key.to_vec(),
                values: e.values.iter().map(|v| v.to_vec()).collect(),
            }),
            owned => owned.clone(),
        }
    }
}

impl PartialEq for DictEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && self.values().eq(other.values())
    }
}

impl Eq for DictEntry {}

impl fmt::Display for DictEntry {
    /// Text dictionary form: `key<TAB>value value ...`, lossily decoded
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t", String::from_utf8_lossy(self.key()))?;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", String::from_utf8_lossy(value))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum ValuesInner<'a> {
    One(Option<&'a Vec<u8>>),
    Owned(std::slice::Iter<'a, Vec<u8>>),
    Shared(std::slice::Iter<'a, Bytes>),
}

/// Iterator over the values of a [`DictEntry`]
#[derive(Debug, Clone)]
pub struct Values<'a> {
    inner: ValuesInner<'a>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            ValuesInner::One(value) => value.take().map(Vec::as_slice),
            ValuesInner::Owned(iter) => iter.next().map(Vec::as_slice),
            ValuesInner::Shared(iter) => iter.next().map(Bytes::as_ref),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match &self.inner {
            ValuesInner::One(value) => usize::from(value.is_some()),
            ValuesInner::Owned(iter) => iter.len(),
            ValuesInner::Shared(iter) => iter.len(),
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Values<'_> {}

impl FusedIterator for Values<'_> {}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_picks_variant_by_value_count() {
        let single = DictEntry::new("后", ["後"]).unwrap();
        assert!(matches!(single, DictEntry::Single(_)));
        assert_eq!(single.num_values(), 1);

        let multi = DictEntry::new("后", ["後", "后"]).unwrap();
        assert!(matches!(multi, DictEntry::Multi(_)));
        assert_eq!(multi.num_values(), 2);

        assert!(matches!(
            DictEntry::new("后", Vec::<Vec<u8>>::new()),
            Err(DictError::EmptyValues)
        ));
        assert!(matches!(
            DictEntry::view(Bytes::from_static(b"k"), Vec::new()),
            Err(DictError::EmptyValues)
        ));
    }

    #[test]
    fn test_accessors_are_uniform() {
        let heap = Bytes::from_static("世界\0world\0earth\0".as_bytes());
        let view = DictEntry::view(
            heap.slice(0..6),
            vec![heap.slice(7..12), heap.slice(13..18)],
        )
        .unwrap();
        let owned = DictEntry::new("世界", ["world", "earth"]).unwrap();

        for entry in [&view, &owned] {
            assert_eq!(entry.key(), "世界".as_bytes());
            assert_eq!(entry.key_len(), 6);
            assert_eq!(entry.key_str(), Some("世界"));
            assert_eq!(entry.num_values(), 2);
            assert_eq!(entry.first_value(), b"world");
            assert_eq!(entry.value(1), Some(&b"earth"[..]));
            assert_eq!(entry.value(2), None);
            assert_eq!(entry.values().len(), 2);
            let values: Vec<&[u8]> = entry.values().collect();
            assert_eq!(values, vec![&b"world"[..], &b"earth"[..]]);
        }

        assert_eq!(view, owned);
        assert!(view.is_view());
        assert!(!owned.is_view());
    }

    #[test]
    fn test_single_value_iteration() {
        let entry = DictEntry::single("a", "b");
        let mut values = entry.values();
        assert_eq!(values.len(), 1);
        assert_eq!(values.next(), Some(&b"b"[..]));
        assert_eq!(values.next(), None);
        assert_eq!(values.next(), None);
        assert_eq!(entry.value(0), Some(&b"b"[..]));
        assert_eq!(entry.value(1), None);
    }

    #[test]
    fn test_to_owned_entry_detaches_views() {
        let heap = Bytes::from(b"key\0v1\0v2\0".to_vec());
        let one = DictEntry::view(heap.slice(0..3), vec![heap.slice(4..6)]).unwrap();
        let two = DictEntry::view(heap.slice(0..3), vec![heap.slice(4..6), heap.slice(7..9)])
            .unwrap();
        drop(heap);

        let owned_one = one.to_owned_entry();
        assert!(matches!(owned_one, DictEntry::Single(_)));
        assert_eq!(owned_one, one);

        let owned_two = two.to_owned_entry();
        assert!(matches!(owned_two, DictEntry::Multi(_)));
        assert_eq!(owned_two, two);
    }

    #[test]
    fn test_equality_ignores_variant_but_not_order() {
        let a = DictEntry::new("k", ["x", "y"]).unwrap();
        let b = DictEntry::new("k", ["y", "x"]).unwrap();
        let c = DictEntry::new("k", ["x"]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(c, DictEntry::single("k", "x"));
    }

    #[test]
    fn test_display_text_form() {
        let entry = DictEntry::new("世界", ["world", "earth"]).unwrap();
        assert_eq!(entry.to_string(), "世界\tworld earth");
    }
}
