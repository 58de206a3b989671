//! In-memory LAN865x emulator
//!
//! [`DummyChip`] answers driver info queries and register requests from a
//! register map instead of a kernel driver. Clones share the same state, so a
//! value written through one channel is visible to the next one.

use crate::channel::{ChannelOpener, ControlChannel};
use crate::name::{DriverName, IfName};
use crate::register::{RegisterAccess, RegisterOp};
use crate::DEFAULT_DRIVER;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

#[derive(Debug)]
struct State {
    driver: DriverName,
    registers: HashMap<u32, u32>,
    extension_supported: bool,
    channels_opened: usize,
    register_requests: usize,
}

/// Emulated chip behind an emulated driver
#[derive(Debug, Clone)]
pub struct DummyChip {
    state: Rc<RefCell<State>>,
}

impl Default for DummyChip {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyChip {
    /// Chip bound to `lan865x` with every register reading zero
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                driver: DriverName::truncating(DEFAULT_DRIVER),
                registers: HashMap::new(),
                extension_supported: true,
                channels_opened: 0,
                register_requests: 0,
            })),
        }
    }

    /// Report a different driver name from the driver info query
    pub fn with_driver(self, driver: &str) -> Self {
        self.state.borrow_mut().driver = DriverName::truncating(driver);
        self
    }

    /// Preset a register value
    pub fn with_register(self, address: u32, value: u32) -> Self {
        self.state.borrow_mut().registers.insert(address, value);
        self
    }

    /// Behave like a driver without the register extension
    pub fn without_extension(self) -> Self {
        self.state.borrow_mut().extension_supported = false;
        self
    }

    /// Current value of a register
    pub fn register(&self, address: u32) -> u32 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Number of channels opened so far
    pub fn channels_opened(&self) -> usize {
        self.state.borrow().channels_opened
    }

    /// Number of register requests that reached the driver
    pub fn register_requests(&self) -> usize {
        self.state.borrow().register_requests
    }
}

/// Channel handed out by [`DummyChip`]
#[derive(Debug)]
pub struct DummyChannel {
    state: Rc<RefCell<State>>,
}

impl ChannelOpener for DummyChip {
    type Channel = DummyChannel;

    fn open(&self) -> io::Result<DummyChannel> {
        self.state.borrow_mut().channels_opened += 1;
        Ok(DummyChannel {
            state: Rc::clone(&self.state),
        })
    }
}

impl ControlChannel for DummyChannel {
    fn driver_info(&mut self, _ifname: &IfName) -> io::Result<DriverName> {
        Ok(self.state.borrow().driver.clone())
    }

    fn register_request(&mut self, ifname: &IfName, request: &mut RegisterAccess) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.register_requests += 1;

        if !state.extension_supported {
            return Err(io::Error::from_raw_os_error(95)); // EOPNOTSUPP
        }

        match request.op() {
            Some(RegisterOp::Read) => {
                request.value = state.registers.get(&request.address).copied().unwrap_or(0);
            }
            Some(RegisterOp::Write) => {
                state.registers.insert(request.address, request.value);
            }
            None => return Err(io::Error::from_raw_os_error(22)), // EINVAL
        }

        log::trace!(
            "dummy {}: {:?} 0x{:08X} = 0x{:08X}",
            ifname,
            request.op(),
            request.address,
            request.value
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;
    use crate::RegisterAccessor;

    #[test]
    fn test_preset_register_is_readable() {
        let chip = DummyChip::new().with_register(0x10000, 0x8651_0011);
        let accessor = RegisterAccessor::new(chip.clone());
        let ifname = IfName::new("eth0").unwrap();

        assert_eq!(accessor.read_register(&ifname, 0x10000).unwrap(), 0x8651_0011);
        assert_eq!(accessor.read_register(&ifname, 0x10001).unwrap(), 0);
    }

    #[test]
    fn test_one_channel_per_operation() {
        let chip = DummyChip::new();
        let accessor = RegisterAccessor::new(chip.clone());
        let ifname = IfName::new("eth0").unwrap();

        accessor.write_register(&ifname, 0x10003, 0x26).unwrap();
        accessor.read_register(&ifname, 0x10003).unwrap();
        assert_eq!(chip.channels_opened(), 2);
        assert_eq!(chip.register(0x10003), 0x26);
    }

    #[test]
    fn test_missing_extension_is_a_request_error() {
        let chip = DummyChip::new().without_extension();
        let accessor = RegisterAccessor::new(chip.clone());
        let ifname = IfName::new("eth0").unwrap();

        let err = accessor.read_register(&ifname, 0x10000).unwrap_err();
        assert!(matches!(err, AccessError::Request { .. }));
        assert_eq!(chip.register_requests(), 1);
    }

    #[test]
    fn test_wrong_driver_never_reaches_registers() {
        let chip = DummyChip::new().with_driver("r8169");
        let accessor = RegisterAccessor::new(chip.clone());
        let ifname = IfName::new("eth0").unwrap();

        let err = accessor.write_register(&ifname, 0x10000, 1).unwrap_err();
        assert!(matches!(err, AccessError::BindingMismatch { .. }));
        assert_eq!(chip.register_requests(), 0);
        assert_eq!(chip.register(0x10000), 0);
    }
}
