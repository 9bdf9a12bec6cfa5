//! Text dictionary format
//!
//! One entry per line: the key, a TAB, then the values separated by spaces.
//!
//! ```text
//! 你好	hello
//! 世界	world earth
//! ```
//!
//! Blank lines are skipped. Entry order is kept exactly as written; nothing
//! is sorted or deduplicated.

use crate::entry::DictEntry;
use crate::error::{DictError, Result};
use crate::lexicon::Lexicon;
use std::io::{Read, Write};
use tracing::info;
use zhconv_storage::{AccessMode, StorageBackend};

/// A lexicon read from or destined for the text format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDict {
    lexicon: Lexicon,
}

impl TextDict {
    /// Wrap a lexicon
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// The entries
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Take the entries
    pub fn into_lexicon(self) -> Lexicon {
        self.lexicon
    }

    /// Parse text dictionary content
    pub fn parse(text: &str) -> Result<Self> {
        let mut lexicon = Lexicon::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() {
                continue;
            }
            lexicon.push(parse_line(line, index + 1)?);
        }
        Ok(Self { lexicon })
    }

    /// Render a lexicon in the text format
    ///
    /// Fails if a key or value is not valid UTF-8, or if it could not be
    /// parsed back unchanged: an empty key or value, a key containing a TAB
    /// or line break, a value containing a space, TAB or line break.
    pub fn to_text(lexicon: &Lexicon) -> Result<String> {
        let mut out = String::new();
        for (index, entry) in lexicon.iter().enumerate() {
            out.push_str(key_text(entry.key(), index)?);
            out.push('\t');
            for (i, value) in entry.values().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(value_text(value, index)?);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Load the resource `name` of `backend`
    pub fn load(backend: &dyn StorageBackend, name: &str) -> Result<Self> {
        let mut stream = backend.open(name, AccessMode::Read)?;
        let mut data = Vec::new();
        stream.read_to_end(&mut data)?;
        stream.close()?;
        let dict = Self::parse(std::str::from_utf8(&data)?)?;
        info!("Loaded text dictionary {} ({} entries)", name, dict.lexicon.len());
        Ok(dict)
    }

    /// Write `lexicon` to the resource `name` of `backend`
    pub fn save(backend: &dyn StorageBackend, name: &str, lexicon: &Lexicon) -> Result<()> {
        let text = Self::to_text(lexicon)?;
        let mut stream = backend.open(name, AccessMode::Write)?;
        stream.write_all(text.as_bytes())?;
        stream.close()?;
        info!("Saved text dictionary {} ({} entries)", name, lexicon.len());
        Ok(())
    }
}

fn key_text(key: &[u8], index: usize) -> Result<&str> {
    let key = std::str::from_utf8(key)?;
    let reason = if key.is_empty() {
        "empty key"
    } else if key.contains(['\t', '\n', '\r']) {
        "contains a TAB or line break"
    } else {
        return Ok(key);
    };
    Err(DictError::NotRepresentableAsText {
        index,
        part: "key",
        reason,
    })
}

fn value_text(value: &[u8], index: usize) -> Result<&str> {
    let value = std::str::from_utf8(value)?;
    let reason = if value.is_empty() {
        "empty value"
    } else if value.contains([' ', '\t', '\n', '\r']) {
        "contains a space, TAB or line break"
    } else {
        return Ok(value);
    };
    Err(DictError::NotRepresentableAsText {
        index,
        part: "value",
        reason,
    })
}

fn parse_line(line: &str, line_number: usize) -> Result<DictEntry> {
    let invalid = |reason: &str| DictError::InvalidTextLine {
        line: line_number,
        reason: reason.to_string(),
    };

    let (key, rest) = line
        .split_once('\t')
        .ok_or_else(|| invalid("missing TAB between key and values"))?;
    if key.is_empty() {
        return Err(invalid("empty key"));
    }
    let values: Vec<&str> = rest.split(' ').filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return Err(invalid(&format!("no values for key {key:?}")));
    }
    DictEntry::new(key, values)
}

impl crate::DictFormat for TextDict {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let text = std::str::from_utf8(data)?;
        Self::parse(text).map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        Self::to_text(&self.lexicon)
            .map(String::into_bytes)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }
}
