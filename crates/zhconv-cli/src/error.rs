//! Error types for the dictionary tool.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Root directory does not exist or is not a directory
    #[error("Dictionary root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// Input dictionary cannot be used
    #[error("Invalid input dictionary '{name}': {reason}")]
    InvalidInput {
        /// Name as given on the command line
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidInput {
            name: "STPhrases.ocd2".to_string(),
            reason: "not a file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input dictionary 'STPhrases.ocd2': not a file"
        );

        let err = ConfigError::InvalidRoot(PathBuf::from("/nowhere"));
        assert_eq!(err.to_string(), "Dictionary root is not a directory: /nowhere");
    }
}
