//! CLI command implementations
//!
//! `read` and `write` take a [`RegisterAccessor`](lanreg_core::RegisterAccessor)
//! and an already resolved interface, so they run the same against the
//! ethtool socket and the in-memory dummy chip. Output goes to a caller
//! supplied writer.

mod list;
pub mod read;
pub mod write;

pub use list::list_registers;

use lanreg_core::AccessError;
use lanreg_linux_net::LocateError;
use thiserror::Error;

/// Command failures, one per stage the user can tell apart
#[derive(Debug, Error)]
pub enum CommandError {
    /// No interface to talk to
    #[error("No LAN8651 interface found ({0})")]
    Discovery(#[from] LocateError),

    /// Register read failed
    #[error("Read failed: {0}")]
    Read(#[source] AccessError),

    /// Register write failed
    #[error("Write failed: {0}")]
    Write(#[source] AccessError),

    /// Output could not be written
    #[error("Cannot write output: {0}")]
    Output(#[from] std::io::Error),
}
