//! zhconv-dict binary entry point.
//!
//! This is a thin wrapper around the zhconv-cli library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Validates configuration
//! 4. Runs the requested command
//!
//! Logs go to standard error so that `dump` output on standard output stays clean.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use zhconv_cli::{CliConfig, run};

fn main() -> Result<()> {
    // Parse configuration from CLI args
    let config = CliConfig::from_args();

    // Initialize tracing subscriber for logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("Configuration loaded: {:?}", config);

    // Validate configuration
    config.validate()?;

    let stdout = std::io::stdout();
    run(&config, &mut stdout.lock())?;

    Ok(())
}
