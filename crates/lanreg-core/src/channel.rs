//! Control channel traits
//!
//! A control channel is whatever handle the platform uses to issue
//! device-control requests against a named interface. On Linux this is a
//! datagram socket used as the target of `SIOCETHTOOL`.
//!
//! Channels are opened once per register operation and dropped afterwards, so
//! backends hand out fresh channels through [`ChannelOpener`] instead of being
//! kept around.

use crate::name::{DriverName, IfName};
use crate::register::RegisterAccess;
use std::io;

/// Handle for issuing control requests against network interfaces
pub trait ControlChannel {
    /// Query the name of the driver bound to `ifname`
    fn driver_info(&mut self, ifname: &IfName) -> io::Result<DriverName>;

    /// Issue one vendor register request
    ///
    /// On success `request` holds whatever the driver wrote back; for reads
    /// that is the register value.
    fn register_request(&mut self, ifname: &IfName, request: &mut RegisterAccess)
        -> io::Result<()>;
}

/// Source of fresh control channels
pub trait ChannelOpener {
    /// Channel type handed out by this opener
    type Channel: ControlChannel;

    /// Open a new channel
    fn open(&self) -> io::Result<Self::Channel>;
}

impl<O: ChannelOpener + ?Sized> ChannelOpener for &O {
    type Channel = O::Channel;

    fn open(&self) -> io::Result<Self::Channel> {
        (**self).open()
    }
}
