//! Command implementations.

use crate::config::{CliConfig, Command};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, warn};
use zhconv_dict::{BinaryDict, DictStats, TextDict};
use zhconv_storage::StorageBackend;

/// Report printed by `inspect --json`.
#[derive(Debug, Serialize)]
pub struct InspectReport<'a> {
    /// Dictionary name as given on the command line
    pub name: &'a str,
    /// Entries are in ascending key order
    pub sorted: bool,
    /// No key appears twice
    pub unique: bool,
    /// Entry and heap figures
    #[serde(flatten)]
    pub stats: DictStats,
}

/// Run the configured command, writing any console output to `out`.
///
/// # Errors
///
/// Returns an error if a dictionary cannot be read, parsed or written.
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let backend = config.backend();
    match &config.command {
        Command::Compile {
            input,
            output,
            sort,
        } => compile(&backend, input, output, *sort),
        Command::Dump { input, output } => dump(&backend, input, output.as_deref(), out),
        Command::Inspect { input, json } => inspect(&backend, input, *json, out),
    }
}

/// Compile a text dictionary into a binary one.
///
/// # Errors
///
/// Returns an error if the text cannot be parsed or the output cannot be written.
pub fn compile(backend: &dyn StorageBackend, input: &str, output: &str, sort: bool) -> Result<()> {
    let mut lexicon = TextDict::load(backend, input)
        .with_context(|| format!("Failed to load text dictionary {input}"))?
        .into_lexicon();

    if sort {
        lexicon.sort();
        debug!("Sorted {} entries", lexicon.len());
    }
    if let Some(key) = lexicon.find_duplicate() {
        warn!("Duplicate key {:?} in {}", String::from_utf8_lossy(key), input);
    }

    let dict = BinaryDict::new(lexicon);
    dict.save(backend, output)
        .with_context(|| format!("Failed to write binary dictionary {output}"))?;

    let stats = dict.stats();
    info!(
        "Compiled {} into {}: {} entries, {} values",
        input, output, stats.num_items, stats.num_values
    );
    Ok(())
}

/// Write a binary dictionary back out as text, to `output` or to `out`.
///
/// # Errors
///
/// Returns an error if the binary dictionary is malformed or the text cannot be written.
pub fn dump<W: Write>(
    backend: &dyn StorageBackend,
    input: &str,
    output: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let dict = BinaryDict::load(backend, input)
        .with_context(|| format!("Failed to load binary dictionary {input}"))?;

    match output {
        Some(name) => {
            TextDict::save(backend, name, dict.lexicon())
                .with_context(|| format!("Failed to write text dictionary {name}"))?;
            info!("Dumped {} entries to {}", dict.lexicon().len(), name);
        }
        None => {
            let text = TextDict::to_text(dict.lexicon())
                .with_context(|| format!("Failed to render {input} as text"))?;
            out.write_all(text.as_bytes())
                .context("Failed to write to output")?;
        }
    }
    Ok(())
}

/// Print entry and heap figures for a binary dictionary.
///
/// # Errors
///
/// Returns an error if the binary dictionary is malformed or the report cannot be written.
pub fn inspect<W: Write>(
    backend: &dyn StorageBackend,
    input: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let dict = BinaryDict::load(backend, input)
        .with_context(|| format!("Failed to load binary dictionary {input}"))?;
    let report = InspectReport {
        name: input,
        sorted: dict.lexicon().is_sorted(),
        unique: dict.lexicon().is_unique(),
        stats: dict.stats(),
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        let stats = &report.stats;
        writeln!(out, "Dictionary:        {}", report.name)?;
        writeln!(out, "Entries:           {}", stats.num_items)?;
        writeln!(out, "Values:            {}", stats.num_values)?;
        writeln!(out, "Key heap:          {} bytes", stats.key_heap_length)?;
        writeln!(out, "Value heap:        {} bytes", stats.value_heap_length)?;
        writeln!(out, "Longest key:       {} bytes", stats.key_max_length)?;
        writeln!(out, "Sorted:            {}", report.sorted)?;
        writeln!(out, "Unique keys:       {}", report.unique)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use zhconv_dict::DictEntry;
    use zhconv_storage::FileSystemBackend;

    const CHARACTERS: &str = "了\t了 瞭\n乾\t幹 乾 干\n";

    fn setup() -> (TempDir, FileSystemBackend) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("chars.txt"), CHARACTERS).unwrap();
        let backend = FileSystemBackend::with_root(dir.path());
        (dir, backend)
    }

    fn run_args(args: &[&str]) -> Result<String> {
        let config = CliConfig::try_parse_from(args)?;
        let mut out = Vec::new();
        run(&config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_compile_then_dump_to_stdout() {
        let (dir, _) = setup();
        let root = dir.path().to_str().unwrap();

        run_args(&["zhconv-dict", "--root", root, "compile", "chars.txt", "chars.ocd2"]).unwrap();
        assert!(dir.path().join("chars.ocd2").is_file());

        let text = run_args(&["zhconv-dict", "--root", root, "dump", "chars.ocd2"]).unwrap();
        assert_eq!(text, CHARACTERS);
    }

    #[test]
    fn test_dump_to_file() {
        let (dir, backend) = setup();
        compile(&backend, "chars.txt", "bin/chars.ocd2", false).unwrap();

        let mut out = Vec::new();
        dump(&backend, "bin/chars.ocd2", Some("again.txt"), &mut out).unwrap();
        assert!(out.is_empty());
        let text = std::fs::read_to_string(dir.path().join("again.txt")).unwrap();
        assert_eq!(text, CHARACTERS);
    }

    #[test]
    fn test_compile_sorted() {
        let (dir, backend) = setup();
        std::fs::write(dir.path().join("unsorted.txt"), "b\tB\na\tA\n").unwrap();
        compile(&backend, "unsorted.txt", "sorted.ocd2", true).unwrap();

        let mut out = Vec::new();
        dump(&backend, "sorted.ocd2", None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\tA\nb\tB\n");
    }

    #[test]
    fn test_inspect_text() {
        let (_dir, backend) = setup();
        compile(&backend, "chars.txt", "chars.ocd2", false).unwrap();

        let mut out = Vec::new();
        inspect(&backend, "chars.ocd2", false, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("Entries:           2\n"));
        assert!(report.contains("Values:            5\n"));
        assert!(report.contains("Longest key:       3 bytes\n"));
    }

    #[test]
    fn test_inspect_json() {
        let (_dir, backend) = setup();
        compile(&backend, "chars.txt", "chars.ocd2", false).unwrap();

        let mut out = Vec::new();
        inspect(&backend, "chars.ocd2", true, &mut out).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["name"], "chars.ocd2");
        assert_eq!(report["num_items"], 2);
        assert_eq!(report["num_values"], 5);
        assert_eq!(report["unique"], true);
    }

    #[test]
    fn test_malformed_input_reports_context() {
        let (dir, backend) = setup();
        std::fs::write(dir.path().join("bad.ocd2"), [1u8, 0]).unwrap();

        let err = inspect(&backend, "bad.ocd2", false, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to load binary dictionary bad.ocd2");
        assert!(
            err.chain()
                .any(|cause| cause.to_string().starts_with("invalid binary dictionary"))
        );
    }

    #[test]
    fn test_dump_refuses_values_with_separators() {
        let (_dir, backend) = setup();
        let lexicon = std::iter::once(DictEntry::single("k", "a b")).collect();
        BinaryDict::new(lexicon).save(&backend, "spaced.ocd2").unwrap();

        let mut out = Vec::new();
        let err = dump(&backend, "spaced.ocd2", None, &mut out).unwrap_err();
        assert!(out.is_empty());
        assert!(err.chain().any(|cause| cause.to_string().contains("cannot be written as text")));
    }

    #[test]
    fn test_missing_text_dictionary() {
        let (_dir, backend) = setup();
        let err = compile(&backend, "absent.txt", "out.ocd2", false).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
