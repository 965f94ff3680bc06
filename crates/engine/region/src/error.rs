//! Error types for the region crate

use crate::Bounds;
use thiserror::Error;

/// Result type alias for region operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when enumerating region blocks
#[derive(Debug, Error)]
pub enum Error {
    /// Block enumeration was requested on a region that is infinite, or
    /// reaches past block coordinates, along some axis
    #[error("Region is not block-bounded: {0:?}")]
    NotBlockBounded(Bounds),

    /// Region spans more chunk columns than can be listed
    #[error("Region spans too many chunk columns: {0}")]
    TooManyChunks(u64),
}
