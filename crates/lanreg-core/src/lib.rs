//! lanreg-core - Core library for LAN865x register access
//!
//! This crate holds everything that does not touch the operating system:
//! bounded interface/driver names, the register request payload that crosses
//! the ioctl boundary, the control channel abstraction, and the accessor that
//! drives a channel through the binding check and the register request.
//!
//! Platform backends (see `lanreg-linux-net`) implement [`ChannelOpener`] and
//! [`ControlChannel`]; the [`dummy`] module provides an in-memory chip for
//! tests.
//!
//! # Example
//!
//! ```
//! use lanreg_core::dummy::DummyChip;
//! use lanreg_core::{IfName, RegisterAccessor};
//!
//! let chip = DummyChip::new();
//! let accessor = RegisterAccessor::new(chip.clone());
//! let ifname = IfName::new("eth0")?;
//!
//! accessor.write_register(&ifname, 0x10003, 0x0C)?;
//! assert_eq!(accessor.read_register(&ifname, 0x10003)?, 0x0C);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod access;
pub mod catalog;
pub mod channel;
pub mod dummy;
pub mod error;
pub mod name;
pub mod register;

pub use access::RegisterAccessor;
pub use channel::{ChannelOpener, ControlChannel};
pub use error::{AccessError, NameError, Result};
pub use name::{DriverName, IfName};
pub use register::{RegisterAccess, RegisterOp};

/// Kernel driver that LAN8650/LAN8651 MAC-PHYs bind to
pub const DEFAULT_DRIVER: &str = "lan865x";
