//! Register request payload
//!
//! The vendor extension commands carry a small fixed-layout record through
//! `ifr_data`:
//!
//! | Offset | Size | Field     |
//! |--------|------|-----------|
//! | 0      | 4    | `cmd`     |
//! | 4      | 4    | `address` |
//! | 8      | 4    | `value`   |
//!
//! All fields are `u32` in host byte order, matching
//! `struct { __u32 cmd; __u32 address; __u32 value; }` on the driver side.
//! The driver reads `cmd` to pick the operation, fills `value` for reads and
//! consumes it for writes.

use core::fmt;

/// Vendor ethtool command: get LAN register
pub const ETHTOOL_GLANREG: u32 = 0x0000_1000;

/// Vendor ethtool command: set LAN register
pub const ETHTOOL_SLANREG: u32 = 0x0000_1001;

/// Encoded size of [`RegisterAccess`] in bytes
pub const ENCODED_LEN: usize = 12;

/// Direction of a register request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOp {
    /// Read a register
    Read,
    /// Write a register
    Write,
}

impl RegisterOp {
    /// Vendor command tag for this operation
    pub const fn command(self) -> u32 {
        match self {
            Self::Read => ETHTOOL_GLANREG,
            Self::Write => ETHTOOL_SLANREG,
        }
    }

    /// Operation for a command tag, if it is one of ours
    pub const fn from_command(cmd: u32) -> Option<Self> {
        match cmd {
            ETHTOOL_GLANREG => Some(Self::Read),
            ETHTOOL_SLANREG => Some(Self::Write),
            _ => None,
        }
    }
}

impl fmt::Display for RegisterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// One register request as exchanged with the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterAccess {
    /// Command tag ([`ETHTOOL_GLANREG`] or [`ETHTOOL_SLANREG`])
    pub cmd: u32,
    /// Register address
    pub address: u32,
    /// Value to write, or the value read back
    pub value: u32,
}

impl RegisterAccess {
    /// Build a read request; the value field starts at zero
    pub const fn read(address: u32) -> Self {
        Self {
            cmd: ETHTOOL_GLANREG,
            address,
            value: 0,
        }
    }

    /// Build a write request
    pub const fn write(address: u32, value: u32) -> Self {
        Self {
            cmd: ETHTOOL_SLANREG,
            address,
            value,
        }
    }

    /// Operation encoded in the command tag
    pub const fn op(&self) -> Option<RegisterOp> {
        RegisterOp::from_command(self.cmd)
    }

    /// Encode into the driver's byte layout
    pub fn encode(&self) -> [u8; ENCODED_LEN] {
        let mut buf = [0u8; ENCODED_LEN];
        buf[0..4].copy_from_slice(&self.cmd.to_ne_bytes());
        buf[4..8].copy_from_slice(&self.address.to_ne_bytes());
        buf[8..12].copy_from_slice(&self.value.to_ne_bytes());
        buf
    }

    /// Decode from the driver's byte layout
    pub fn decode(buf: &[u8; ENCODED_LEN]) -> Self {
        let word = |i: usize| u32::from_ne_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        Self {
            cmd: word(0),
            address: word(4),
            value: word(8),
        }
    }
}
