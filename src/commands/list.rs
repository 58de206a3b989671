//! List command implementation

use lanreg_core::catalog::REGISTERS;
use std::io::{self, Write};

/// List known LAN8651 registers
pub fn list_registers<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Known LAN8651 registers:")?;
    writeln!(out)?;

    for reg in REGISTERS {
        writeln!(
            out,
            "  0x{:08x} - {:<12} - {}",
            reg.address, reg.name, reg.description
        )?;
    }

    Ok(())
}
