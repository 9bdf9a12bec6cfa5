//! Shared fixtures for dictionary tests

use crate::DictFormat;
use crate::entry::DictEntry;
use crate::lexicon::Lexicon;
use std::fmt::Debug;

/// `你好 → hello`, `世界 → world earth`
pub fn greeting_lexicon() -> Lexicon {
    [
        DictEntry::single("你好", "hello"),
        DictEntry::new("世界", ["world", "earth"]).expect("two values"),
    ]
    .into_iter()
    .collect()
}

/// Encode words as native-endian bytes, the way the binary format stores them
pub fn ne_words(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_ne_bytes()).collect()
}

/// Test round-trip serialization for a format instance
///
/// Verifies that a format can be serialized and deserialized back
/// to an equivalent value.
pub fn test_round_trip<T>(original: &T) -> Result<(), Box<dyn std::error::Error>>
where
    T: DictFormat + PartialEq + Debug,
{
    let data = original.build()?;
    let parsed = T::parse(&data)?;

    if original != &parsed {
        return Err(format!(
            "Round-trip verification failed:\nOriginal: {:?}\nParsed: {:?}",
            original, parsed
        )
        .into());
    }

    Ok(())
}
