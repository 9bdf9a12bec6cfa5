//! Ordered collection of dictionary entries

use crate::entry::DictEntry;

/// Insertion-ordered list of entries
///
/// No validation happens here: duplicate keys and empty keys are kept as
/// given, and order is whatever the caller inserted unless [`sort`] is
/// called explicitly.
///
/// [`sort`]: Lexicon::sort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<DictEntry>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty lexicon with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: DictEntry) {
        self.entries.push(entry);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&DictEntry> {
        self.entries.get(index)
    }

    /// Entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, DictEntry> {
        self.entries.iter()
    }

    /// Entries as a slice
    pub fn as_slice(&self) -> &[DictEntry] {
        &self.entries
    }

    /// Longest key in bytes, 0 when empty
    pub fn key_max_length(&self) -> usize {
        self.entries.iter().map(DictEntry::key_len).max().unwrap_or(0)
    }

    /// Stable sort by key bytes
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.key().cmp(b.key()));
    }

    /// Whether entries are in non-decreasing key order
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].key() <= w[1].key())
    }

    /// First key that appears in two adjacent entries
    ///
    /// Only finds every duplicate when the lexicon is sorted.
    pub fn find_duplicate(&self) -> Option<&[u8]> {
        self.entries
            .windows(2)
            .find(|w| w[0].key() == w[1].key())
            .map(|w| w[0].key())
    }

    /// Whether no two adjacent entries share a key
    pub fn is_unique(&self) -> bool {
        self.find_duplicate().is_none()
    }
}

impl FromIterator<DictEntry> for Lexicon {
    fn from_iter<I: IntoIterator<Item = DictEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<DictEntry> for Lexicon {
    fn extend<I: IntoIterator<Item = DictEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Lexicon {
    type Item = DictEntry;
    type IntoIter = std::vec::IntoIter<DictEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a DictEntry;
    type IntoIter = std::slice::Iter<'a, DictEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
