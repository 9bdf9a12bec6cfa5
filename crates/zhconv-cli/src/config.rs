//! Command-line configuration.
//!
//! Configuration can be provided via:
//! - CLI arguments (`--root`, `--verbose`, etc.)
//! - Environment variables (`ZHCONV_ROOT`, `ZHCONV_LOG_JSON`)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use zhconv_cli::CliConfig;
//!
//! let config = CliConfig::from_args();
//! config.validate().expect("Invalid configuration");
//! println!("Log level: {}", config.log_level());
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zhconv_storage::FileSystemBackend;

/// Configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "zhconv-dict",
    about = "Compile, dump and inspect Chinese conversion dictionaries",
    version
)]
pub struct CliConfig {
    /// Directory dictionary names are resolved against
    #[arg(long, global = true, env = "ZHCONV_ROOT")]
    pub root: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "ZHCONV_LOG_JSON")]
    pub log_json: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Dictionary operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Compile a text dictionary into the binary format
    Compile {
        /// Text dictionary (`key<TAB>value value ...` per line)
        input: String,
        /// Binary dictionary to write
        output: String,
        /// Sort entries by key before writing
        #[arg(long)]
        sort: bool,
    },

    /// Write a binary dictionary back out as text
    Dump {
        /// Binary dictionary to read
        input: String,
        /// Text file to write; standard output when omitted
        output: Option<String>,
    },

    /// Print entry and heap figures for a binary dictionary
    Inspect {
        /// Binary dictionary to read
        input: String,
        /// Print the figures as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Name of the dictionary the command reads.
    pub fn input(&self) -> &str {
        match self {
            Self::Compile { input, .. } | Self::Dump { input, .. } | Self::Inspect { input, .. } => {
                input
            }
        }
    }
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Storage backend rooted at `--root`, or at the working directory.
    pub fn backend(&self) -> FileSystemBackend {
        self.root
            .as_ref()
            .map_or_else(FileSystemBackend::new, FileSystemBackend::with_root)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The root is set but is not a directory
    /// - The input dictionary doesn't exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root
            && !root.is_dir()
        {
            return Err(ConfigError::InvalidRoot(root.clone()));
        }

        let input = self.command.input();
        if input.is_empty() {
            return Err(ConfigError::MissingRequired("input dictionary".to_string()));
        }

        let path = self.backend().resolve(input).map_err(|e| ConfigError::InvalidInput {
            name: input.to_string(),
            reason: e.to_string(),
        })?;
        if !path.is_file() {
            return Err(ConfigError::InvalidInput {
                name: input.to_string(),
                reason: format!("{} is not a file", path.display()),
            });
        }

        Ok(())
    }
}
