//! Error types for lanreg-core

use crate::name::{DriverName, IfName};
use crate::register::RegisterOp;
use std::io;
use thiserror::Error;

/// Errors raised when building a bounded name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Name is empty
    #[error("name is empty")]
    Empty,

    /// Name does not fit the fixed-size kernel buffer
    #[error("name '{name}' is {len} bytes long, at most {max} allowed")]
    TooLong {
        /// Rejected name
        name: String,
        /// Its length in bytes
        len: usize,
        /// Largest length that fits
        max: usize,
    },

    /// Name contains a character the kernel does not accept
    #[error("name '{name}' contains invalid character {found:?}")]
    InvalidChar {
        /// Rejected name
        name: String,
        /// First offending character
        found: char,
    },
}

/// Register access errors
///
/// Each variant names the stage that failed. A driver without the register
/// extension rejects the request the same way as any other ioctl failure, so
/// both end up in [`AccessError::Request`].
#[derive(Debug, Error)]
pub enum AccessError {
    /// The control channel could not be opened
    #[error("cannot open control channel: {0}")]
    ChannelOpen(#[source] io::Error),

    /// The driver info query failed
    #[error("driver info query on {ifname} failed: {source}")]
    DriverQuery {
        /// Queried interface
        ifname: IfName,
        /// OS error
        #[source]
        source: io::Error,
    },

    /// The interface is bound to another driver
    #[error("interface {ifname} is not using {expected} driver (reports '{found}')")]
    BindingMismatch {
        /// Queried interface
        ifname: IfName,
        /// Driver the accessor was configured for
        expected: DriverName,
        /// Driver the interface reported
        found: DriverName,
    },

    /// The register request was rejected
    #[error("register {op} at 0x{address:08X} failed (driver extension needed): {source}")]
    Request {
        /// Read or write
        op: RegisterOp,
        /// Register address
        address: u32,
        /// OS error
        #[source]
        source: io::Error,
    },
}

/// Result type for register access
pub type Result<T> = std::result::Result<T, AccessError>;
