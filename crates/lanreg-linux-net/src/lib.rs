//! lanreg-linux-net - Linux backend for lanreg
//!
//! This crate finds the network interface a LAN865x MAC-PHY is exposed as and
//! talks to its driver through the ethtool ioctl.
//!
//! # Overview
//!
//! - [`Locator`] scans `/proc/net/dev` for `eth*` interfaces and resolves the
//!   kernel module behind each one through
//!   `/sys/class/net/<if>/device/driver/module`.
//! - [`EthtoolOpener`] hands out [`EthtoolSocket`]s, datagram sockets that
//!   issue `SIOCETHTOOL` requests. It plugs into
//!   [`lanreg_core::RegisterAccessor`].
//!
//! # Example
//!
//! ```no_run
//! use lanreg_core::{RegisterAccessor, DEFAULT_DRIVER};
//! use lanreg_linux_net::{EthtoolOpener, Locator, LocatorConfig};
//!
//! let ifname = Locator::new(LocatorConfig::new()).locate(DEFAULT_DRIVER)?;
//! let accessor = RegisterAccessor::new(EthtoolOpener);
//!
//! let id = accessor.read_register(&ifname, 0x10000)?;
//! println!("ID_REV = 0x{:08X}", id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System Requirements
//!
//! - The `lan865x` driver bound to the MAC-PHY
//! - A driver carrying the register access ethtool extension; without it
//!   every register request fails
//! - `CAP_NET_ADMIN` may be required depending on the driver

pub mod error;
pub mod ethtool;
pub mod locator;

// Re-exports
pub use error::{LocateError, Result};
pub use ethtool::{EthtoolOpener, EthtoolSocket};
pub use locator::{Candidate, Locator, LocatorConfig};
