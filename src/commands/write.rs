//! Write command implementation

use super::CommandError;
use lanreg_core::{ChannelOpener, IfName, RegisterAccessor};
use std::io::Write;

/// Result line for a successful write
pub fn format_write(address: u32, value: u32) -> String {
    format!("WRITE 0x{:08X} = 0x{:08X} - OK", address, value)
}

/// Run the write command
pub fn run_write<O: ChannelOpener, W: Write>(
    accessor: &RegisterAccessor<O>,
    ifname: &IfName,
    address: u32,
    value: u32,
    out: &mut W,
) -> Result<(), CommandError> {
    accessor
        .write_register(ifname, address, value)
        .map_err(CommandError::Write)?;

    writeln!(out, "{}", format_write(address, value))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::read::run_read;
    use lanreg_core::dummy::DummyChip;
    use lanreg_core::AccessError;

    #[test]
    fn test_write_output() {
        let chip = DummyChip::new();
        let accessor = RegisterAccessor::new(chip.clone());
        let ifname = IfName::new("eth0").unwrap();
        let mut out = Vec::new();

        run_write(&accessor, &ifname, 0x10000, 0x0C, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "WRITE 0x00010000 = 0x0000000C - OK\n"
        );
        assert_eq!(chip.register(0x10000), 0x0C);
    }

    #[test]
    fn test_write_then_read() {
        let accessor = RegisterAccessor::new(DummyChip::new());
        let ifname = IfName::new("eth0").unwrap();
        let mut out = Vec::new();

        run_write(&accessor, &ifname, 0x10003, 0x26, &mut out).unwrap();
        run_read(&accessor, &ifname, 0x10003, false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "WRITE 0x00010003 = 0x00000026 - OK\nREAD 0x00010003 = 0x00000026 (38)\n"
        );
    }

    #[test]
    fn test_unsupported_extension_reports_write_failure() {
        let accessor = RegisterAccessor::new(DummyChip::new().without_extension());
        let ifname = IfName::new("eth0").unwrap();
        let mut out = Vec::new();

        let err = run_write(&accessor, &ifname, 0x10000, 1, &mut out).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Write(AccessError::Request { .. })
        ));
        assert!(err.to_string().starts_with("Write failed: register write at 0x00010000"));
        assert!(out.is_empty());
    }
}
