//! CLI argument parsing

use clap::{Parser, Subcommand};
use lanreg_core::{DriverName, IfName, DEFAULT_DRIVER};

/// Parse a register address or value the way `strtoul(s, NULL, 0)` does
///
/// Accepts decimal, `0x`/`0X` prefixed hexadecimal and `0` prefixed octal.
pub fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    // from_str_radix accepts a leading '+', strtoul-style input never needs it
    if digits.is_empty() || digits.starts_with('+') {
        return Err(format!("Invalid number: '{}'", s));
    }

    u32::from_str_radix(digits, radix).map_err(|e| format!("Invalid number '{}': {}", s, e))
}

fn parse_ifname(s: &str) -> Result<IfName, String> {
    IfName::new(s).map_err(|e| e.to_string())
}

fn parse_driver(s: &str) -> Result<DriverName, String> {
    DriverName::new(s).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "lanreg")]
#[command(author, version, about = "LAN865x register access through the ethtool ioctl", long_about = None)]
#[command(override_usage = "lanreg [OPTIONS] <read|write|list> [address] [value]")]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this interface instead of searching for one
    #[arg(short, long, global = true, value_parser = parse_ifname)]
    pub interface: Option<IfName>,

    /// Driver the interface must be bound to
    #[arg(long, global = true, default_value = DEFAULT_DRIVER, value_parser = parse_driver)]
    pub driver: DriverName,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a register
    #[command(after_help = "Example: lanreg read 0x10000")]
    Read {
        /// Register address (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_number)]
        address: u32,

        /// Also print the binary form and known fields
        #[arg(short, long)]
        decode: bool,
    },

    /// Write a register
    #[command(after_help = "Example: lanreg write 0x10000 0x0C")]
    Write {
        /// Register address (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_number)]
        address: u32,

        /// Value to store (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_number)]
        value: u32,
    },

    /// List known LAN8651 registers
    List,
}
