//! Known LAN8651 registers
//!
//! Addresses are in the flat `MMS << 16 | offset` form the driver extension
//! takes. ID_REV, STATUS0 and CONFIG0 also have field decoders.

use bitflags::bitflags;
use core::fmt;

/// A named register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterInfo {
    /// Register address
    pub address: u32,
    /// Short register name
    pub name: &'static str,
    /// Human readable description
    pub description: &'static str,
}

/// Chip and revision identification
pub const ID_REV: u32 = 0x0001_0000;
/// Status register 0
pub const STATUS0: u32 = 0x0001_0001;
/// Status register 1
pub const STATUS1: u32 = 0x0001_0002;
/// Configuration register 0
pub const CONFIG0: u32 = 0x0001_0003;
/// Configuration register 1
pub const CONFIG1: u32 = 0x0001_0004;
/// Configuration register 2
pub const CONFIG2: u32 = 0x0001_0005;
/// Configuration register 3
pub const CONFIG3: u32 = 0x0001_0006;
/// Configuration register 4
pub const CONFIG4: u32 = 0x0001_0007;
/// FIFO size configuration
pub const FIFO_SIZE: u32 = 0x0001_0020;
/// Chunk size configuration
pub const CHUNK_SIZE: u32 = 0x0001_0021;

/// All known registers, in address order
pub static REGISTERS: &[RegisterInfo] = &[
    RegisterInfo {
        address: ID_REV,
        name: "ID_REV",
        description: "Chip and Revision ID",
    },
    RegisterInfo {
        address: STATUS0,
        name: "STATUS0",
        description: "Status Register 0",
    },
    RegisterInfo {
        address: STATUS1,
        name: "STATUS1",
        description: "Status Register 1",
    },
    RegisterInfo {
        address: CONFIG0,
        name: "CONFIG0",
        description: "Configuration Register 0",
    },
    RegisterInfo {
        address: CONFIG1,
        name: "CONFIG1",
        description: "Configuration Register 1",
    },
    RegisterInfo {
        address: CONFIG2,
        name: "CONFIG2",
        description: "Configuration Register 2",
    },
    RegisterInfo {
        address: CONFIG3,
        name: "CONFIG3",
        description: "Configuration Register 3",
    },
    RegisterInfo {
        address: CONFIG4,
        name: "CONFIG4",
        description: "Configuration Register 4",
    },
    RegisterInfo {
        address: FIFO_SIZE,
        name: "FIFO_SIZE",
        description: "FIFO Size Configuration",
    },
    RegisterInfo {
        address: CHUNK_SIZE,
        name: "CHUNK_SIZE",
        description: "Chunk Size Configuration",
    },
];

/// Look up a register by address
pub fn lookup(address: u32) -> Option<&'static RegisterInfo> {
    REGISTERS.iter().find(|r| r.address == address)
}

bitflags! {
    /// STATUS0 error bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status0: u32 {
        /// Transmit frame check sequence error
        const TX_FRAME_CHECK_SEQUENCE_ERROR = 1 << 0;
        /// Transmit frame error
        const TX_FRAME_ERROR = 1 << 1;
        /// Transmit buffer overflow
        const TX_BUFFER_OVERFLOW_ERROR = 1 << 2;
        /// Transmit FIFO underflow
        const TX_FIFO_UNDERFLOW = 1 << 3;
        /// Receive FIFO overflow
        const RX_FIFO_OVERFLOW = 1 << 4;
        /// Receive header error
        const RX_HEADER_ERROR = 1 << 5;
    }
}

bitflags! {
    /// CONFIG0 bits with a known meaning
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Config0: u32 {
        /// Control transactions are parity protected
        const PROTECTED = 1 << 2;
        /// Transmit cut-through mode
        const TX_CUT_THROUGH = 1 << 4;
        /// Receive cut-through mode
        const RX_CUT_THROUGH = 1 << 5;
    }
}

/// Field-level view of a register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// ID_REV split into chip ID and revision
    IdRev {
        /// Upper 16 bits
        chip_id: u16,
        /// Lower 16 bits
        revision: u16,
    },
    /// STATUS0 error bits
    Status0(Status0),
    /// CONFIG0 bits
    Config0(Config0),
}

/// Decode the fields of a known register, if there is a decoder for it
pub fn decode(address: u32, value: u32) -> Option<Decoded> {
    match address {
        ID_REV => Some(Decoded::IdRev {
            chip_id: (value >> 16) as u16,
            revision: (value & 0xFFFF) as u16,
        }),
        STATUS0 => Some(Decoded::Status0(Status0::from_bits_truncate(value))),
        CONFIG0 => Some(Decoded::Config0(Config0::from_bits_truncate(value))),
        _ => None,
    }
}

impl fmt::Display for Decoded {
    /// One line per field
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdRev { chip_id, revision } => {
                write!(f, "Chip ID: 0x{:04x}, Revision: 0x{:04x}", chip_id, revision)
            }
            Self::Status0(bits) => write_bits(f, *bits, Status0::all().iter_names()),
            Self::Config0(bits) => write_bits(f, *bits, Config0::all().iter_names()),
        }
    }
}

fn write_bits<F: bitflags::Flags + Copy>(
    f: &mut fmt::Formatter<'_>,
    bits: F,
    names: impl Iterator<Item = (&'static str, F)>,
) -> fmt::Result {
    for (i, (name, flag)) in names.enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}: {}", name, u8::from(bits.contains(flag)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(0x10000).map(|r| r.name), Some("ID_REV"));
        assert_eq!(lookup(CHUNK_SIZE).map(|r| r.name), Some("CHUNK_SIZE"));
        assert!(lookup(0x10008).is_none());
    }

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        for pair in REGISTERS.windows(2) {
            assert!(pair[0].address < pair[1].address);
        }
    }

    #[test]
    fn test_decode_id_rev() {
        let decoded = decode(ID_REV, 0x8651_0011).unwrap();
        assert_eq!(
            decoded,
            Decoded::IdRev {
                chip_id: 0x8651,
                revision: 0x0011
            }
        );
        assert_eq!(decoded.to_string(), "Chip ID: 0x8651, Revision: 0x0011");
    }

    #[test]
    fn test_decode_status0() {
        let decoded = decode(STATUS0, 0b01_0010).unwrap();
        let text = decoded.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "TX_FRAME_CHECK_SEQUENCE_ERROR: 0",
                "TX_FRAME_ERROR: 1",
                "TX_BUFFER_OVERFLOW_ERROR: 0",
                "TX_FIFO_UNDERFLOW: 0",
                "RX_FIFO_OVERFLOW: 1",
                "RX_HEADER_ERROR: 0",
            ]
        );
    }

    #[test]
    fn test_decode_config0_ignores_unknown_bits() {
        let decoded = decode(CONFIG0, 0xFFFF_FF34).unwrap();
        assert_eq!(decoded, Decoded::Config0(Config0::all()));

        let decoded = decode(CONFIG0, 0x0000_0004).unwrap();
        assert_eq!(
            decoded.to_string(),
            "PROTECTED: 1\nTX_CUT_THROUGH: 0\nRX_CUT_THROUGH: 0"
        );
    }

    #[test]
    fn test_no_decoder_for_plain_registers() {
        assert_eq!(decode(FIFO_SIZE, 0x1234), None);
    }
}
