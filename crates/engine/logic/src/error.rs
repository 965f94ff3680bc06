//! Error types for the logic crate

use thiserror::Error;

/// Result type alias for logic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the dispatcher
#[derive(Debug, Error)]
pub enum Error {
    /// Map proto version string is not `major.minor.patch`
    #[error("Invalid proto version: {0}")]
    InvalidVersion(String),

    /// Config file could not be decoded
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
