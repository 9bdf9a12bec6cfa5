#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Compiling text dictionaries to binary ones through real storage backends

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;
use zhconv_dict::{BinaryDict, DictEntry, DictError, Field, TextDict};
use zhconv_storage::{FileSystemBackend, MemoryBackend, StorageBackend};

const PHRASES: &str = "\
一丝不挂\t一絲不掛
一了百了\t一了百了
乾\t幹 乾 干
了\t了 瞭
";

#[test]
fn compile_text_to_binary_on_disk() {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileSystemBackend::with_root(dir.path());
    std::fs::write(dir.path().join("STPhrases.txt"), PHRASES).unwrap();

    let text = TextDict::load(&backend, "STPhrases.txt").unwrap();
    BinaryDict::new(text.lexicon().clone())
        .save(&backend, "out/STPhrases.ocd2")
        .unwrap();
    assert!(backend.exists("out/STPhrases.ocd2"));

    let dict = BinaryDict::load(&backend, "out/STPhrases.ocd2").unwrap();
    assert_eq!(dict.lexicon(), text.lexicon());
    assert_eq!(dict.key_max_length(), 12);

    let stats = dict.stats();
    assert_eq!(stats.num_items, 4);
    assert_eq!(stats.num_values, 7);

    // Dumping the binary form back to text reproduces the source
    TextDict::save(&backend, "dump.txt", dict.lexicon()).unwrap();
    let dumped = std::fs::read_to_string(dir.path().join("dump.txt")).unwrap();
    assert_eq!(dumped, PHRASES);
}

#[test]
fn truncated_file_on_disk_is_a_format_error() {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileSystemBackend::with_root(dir.path());

    let lexicon = TextDict::parse(PHRASES).unwrap().into_lexicon();
    let data = BinaryDict::new(lexicon).to_bytes().unwrap();
    std::fs::write(dir.path().join("cut.ocd2"), &data[..data.len() - 2]).unwrap();

    let err = BinaryDict::load(&backend, "cut.ocd2").unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(
        err,
        DictError::Truncated {
            field: Field::ValueOffset
        }
    ));
    assert!(err.to_string().starts_with("invalid binary dictionary"));
}

#[test]
fn rejected_save_leaves_file_on_disk_untouched() {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileSystemBackend::with_root(dir.path());

    let lexicon = TextDict::parse(PHRASES).unwrap().into_lexicon();
    BinaryDict::new(lexicon).save(&backend, "STPhrases.ocd2").unwrap();
    let before = std::fs::read(dir.path().join("STPhrases.ocd2")).unwrap();

    let bad = DictEntry::new("乾", ["幹", "乾\0"]).unwrap();
    let err = BinaryDict::new(std::iter::once(bad).collect())
        .save(&backend, "STPhrases.ocd2")
        .unwrap_err();
    assert!(matches!(err, DictError::EmbeddedNul { index: 0, part: "value" }));

    let after = std::fs::read(dir.path().join("STPhrases.ocd2")).unwrap();
    assert_eq!(after, before);
}

#[test]
fn memory_backend_serves_embedded_dictionaries() {
    let lexicon = TextDict::parse(PHRASES).unwrap().into_lexicon();
    let backend: Arc<dyn StorageBackend> = {
        let memory = MemoryBackend::new();
        memory.insert("TSCharacters.ocd2", BinaryDict::new(lexicon.clone()).to_bytes().unwrap());
        Arc::new(memory)
    };

    let dict = BinaryDict::load(backend.as_ref(), "TSCharacters.ocd2").unwrap();
    assert_eq!(dict.lexicon(), &lexicon);
    assert!(!backend.exists("TWPhrases.ocd2"));
}
