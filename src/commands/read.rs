//! Read command implementation

use super::CommandError;
use lanreg_core::catalog;
use lanreg_core::{ChannelOpener, IfName, RegisterAccessor};
use std::io::Write;

/// Result line for a successful read
pub fn format_read(address: u32, value: u32) -> String {
    format!("READ 0x{:08X} = 0x{:08X} ({})", address, value, value)
}

/// Run the read command
pub fn run_read<O: ChannelOpener, W: Write>(
    accessor: &RegisterAccessor<O>,
    ifname: &IfName,
    address: u32,
    decode: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let value = accessor
        .read_register(ifname, address)
        .map_err(CommandError::Read)?;

    writeln!(out, "{}", format_read(address, value))?;

    if decode {
        print_decoded(out, address, value)?;
    }

    Ok(())
}

/// Binary form, register name and decoded fields
fn print_decoded<W: Write>(out: &mut W, address: u32, value: u32) -> std::io::Result<()> {
    writeln!(out, "Binary: {:032b}", value)?;

    if let Some(info) = catalog::lookup(address) {
        writeln!(out, "Name: {} ({})", info.name, info.description)?;
    }
    if let Some(fields) = catalog::decode(address, value) {
        writeln!(out, "{}", fields)?;
    }

    Ok(())
}
