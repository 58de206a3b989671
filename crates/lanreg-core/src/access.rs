//! Register accessor
//!
//! [`RegisterAccessor`] performs one register read or write per call:
//!
//! 1. open a fresh control channel
//! 2. confirm that the interface is bound to the expected driver
//! 3. issue the vendor register request
//!
//! Any failure ends the call; nothing is retried.

use crate::channel::{ChannelOpener, ControlChannel};
use crate::error::{AccessError, Result};
use crate::name::{DriverName, IfName};
use crate::register::{RegisterAccess, RegisterOp};
use crate::DEFAULT_DRIVER;

/// Reads and writes LAN865x registers through a control channel
#[derive(Debug, Clone)]
pub struct RegisterAccessor<O> {
    opener: O,
    expected_driver: DriverName,
}

impl<O: ChannelOpener> RegisterAccessor<O> {
    /// Create an accessor that expects the `lan865x` driver
    pub fn new(opener: O) -> Self {
        Self {
            opener,
            expected_driver: DriverName::truncating(DEFAULT_DRIVER),
        }
    }

    /// Expect a different driver name in the binding check
    pub fn with_expected_driver(mut self, driver: DriverName) -> Self {
        self.expected_driver = driver;
        self
    }

    /// Driver name the binding check compares against
    pub fn expected_driver(&self) -> &DriverName {
        &self.expected_driver
    }

    /// Read the register at `address`
    pub fn read_register(&self, ifname: &IfName, address: u32) -> Result<u32> {
        let reply = self.transact(ifname, RegisterOp::Read, RegisterAccess::read(address))?;
        log::debug!(
            "{}: read 0x{:08X} -> 0x{:08X}",
            ifname,
            address,
            reply.value
        );
        Ok(reply.value)
    }

    /// Write `value` to the register at `address`
    pub fn write_register(&self, ifname: &IfName, address: u32, value: u32) -> Result<()> {
        self.transact(
            ifname,
            RegisterOp::Write,
            RegisterAccess::write(address, value),
        )?;
        log::debug!("{}: wrote 0x{:08X} <- 0x{:08X}", ifname, address, value);
        Ok(())
    }

    fn transact(
        &self,
        ifname: &IfName,
        op: RegisterOp,
        mut request: RegisterAccess,
    ) -> Result<RegisterAccess> {
        let mut channel = self.opener.open().map_err(AccessError::ChannelOpen)?;

        self.confirm_binding(&mut channel, ifname)?;

        channel
            .register_request(ifname, &mut request)
            .map_err(|source| AccessError::Request {
                op,
                address: request.address,
                source,
            })?;

        Ok(request)
    }

    fn confirm_binding(&self, channel: &mut O::Channel, ifname: &IfName) -> Result<()> {
        let found = channel
            .driver_info(ifname)
            .map_err(|source| AccessError::DriverQuery {
                ifname: ifname.clone(),
                source,
            })?;

        if found != self.expected_driver {
            log::warn!(
                "{} reports driver '{}', expected '{}'",
                ifname,
                found,
                self.expected_driver
            );
            return Err(AccessError::BindingMismatch {
                ifname: ifname.clone(),
                expected: self.expected_driver.clone(),
                found,
            });
        }

        log::trace!("{} is bound to {}", ifname, found);
        Ok(())
    }
}
