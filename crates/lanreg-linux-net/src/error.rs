//! Error types for Linux interface discovery

use std::io;
use thiserror::Error;

/// Interface discovery errors
#[derive(Debug, Error)]
pub enum LocateError {
    /// The interface listing could not be read
    #[error("cannot read interface listing '{path}': {source}")]
    ListingRead {
        path: String,
        #[source]
        source: io::Error,
    },

    /// No interface is bound to the target driver
    #[error("no interface bound to a '{driver}' driver found")]
    NotFound { driver: String },
}

/// Result type for interface discovery
pub type Result<T> = std::result::Result<T, LocateError>;
