//! Command-line front end for zhconv dictionaries.
//!
//! The `zhconv-dict` binary is a thin wrapper around this library:
//! - `config`: CLI arguments, environment fallbacks and validation
//! - `commands`: compile, dump and inspect operations
//! - `error`: configuration errors
//!
//! # Example
//!
//! ```no_run
//! use zhconv_cli::{CliConfig, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = CliConfig::from_args();
//!     config.validate()?;
//!     run(&config, &mut std::io::stdout().lock())
//! }
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;

pub use commands::run;
pub use config::{CliConfig, Command};
pub use error::ConfigError;
