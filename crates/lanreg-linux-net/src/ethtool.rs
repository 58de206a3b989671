//! `SIOCETHTOOL` control channel
//!
//! Every request goes through an `AF_INET`/`SOCK_DGRAM` socket as
//! `ioctl(fd, SIOCETHTOOL, &ifreq)`, with `ifreq.ifr_data` pointing at the
//! ethtool command buffer. The first `u32` of that buffer selects the
//! command.

use lanreg_core::name::IFNAMSIZ;
use lanreg_core::register::ENCODED_LEN;
use lanreg_core::{ChannelOpener, ControlChannel, DriverName, IfName, RegisterAccess};
use log::trace;
use nix::sys::socket::{socket, AddressFamily, SockFlag, SockType};
use std::io;
use std::mem::size_of;
use std::os::fd::{AsRawFd, OwnedFd};

/// Standard ethtool command: get driver info
const ETHTOOL_GDRVINFO: u32 = 0x0000_0003;

/// Length of the string fields in `struct ethtool_drvinfo`
const ETHTOOL_STR_LEN: usize = 32;

/// `SIOCETHTOOL` from linux/sockios.h
const SIOCETHTOOL: libc::c_ulong = 0x8946;

// SIOCETHTOOL is not built with _IOC, so use the "bad" variant
nix::ioctl_readwrite_bad!(siocethtool, SIOCETHTOOL, IfReq);

/// Bytes of the `ifr_ifru` union past the data pointer
///
/// The union is as large as `struct ifmap` (two `unsigned long` plus 8
/// bytes once padded).
const IFRU_PAD: usize = 2 * size_of::<libc::c_ulong>() + 8 - size_of::<*mut libc::c_void>();

/// `struct ifreq` restricted to the `ifr_data` member
#[repr(C)]
#[allow(dead_code)] // read by the kernel
struct IfReq {
    ifr_name: [u8; IFNAMSIZ],
    ifr_data: *mut libc::c_void,
    _pad: [u8; IFRU_PAD],
}

impl IfReq {
    fn new(ifname: &IfName, data: *mut libc::c_void) -> Self {
        Self {
            ifr_name: ifname.to_c_buf(),
            ifr_data: data,
            _pad: [0; IFRU_PAD],
        }
    }
}

/// `struct ethtool_drvinfo` from linux/ethtool.h
#[repr(C)]
#[allow(dead_code)]
struct EthtoolDrvinfo {
    cmd: u32,
    driver: [u8; ETHTOOL_STR_LEN],
    version: [u8; ETHTOOL_STR_LEN],
    fw_version: [u8; ETHTOOL_STR_LEN],
    bus_info: [u8; ETHTOOL_STR_LEN],
    erom_version: [u8; ETHTOOL_STR_LEN],
    reserved2: [u8; 12],
    n_priv_flags: u32,
    n_stats: u32,
    testinfo_len: u32,
    eedump_len: u32,
    regdump_len: u32,
}

impl EthtoolDrvinfo {
    fn query() -> Self {
        Self {
            cmd: ETHTOOL_GDRVINFO,
            driver: [0; ETHTOOL_STR_LEN],
            version: [0; ETHTOOL_STR_LEN],
            fw_version: [0; ETHTOOL_STR_LEN],
            bus_info: [0; ETHTOOL_STR_LEN],
            erom_version: [0; ETHTOOL_STR_LEN],
            reserved2: [0; 12],
            n_priv_flags: 0,
            n_stats: 0,
            testinfo_len: 0,
            eedump_len: 0,
            regdump_len: 0,
        }
    }
}

/// Opens a new [`EthtoolSocket`] per register operation
#[derive(Debug, Clone, Copy, Default)]
pub struct EthtoolOpener;

impl ChannelOpener for EthtoolOpener {
    type Channel = EthtoolSocket;

    fn open(&self) -> io::Result<EthtoolSocket> {
        EthtoolSocket::open()
    }
}

/// Datagram socket used as the target of `SIOCETHTOOL`
///
/// The socket is closed when the value is dropped.
#[derive(Debug)]
pub struct EthtoolSocket {
    fd: OwnedFd,
}

impl EthtoolSocket {
    /// Open an `AF_INET` datagram socket
    pub fn open() -> io::Result<Self> {
        let fd = socket(
            AddressFamily::Inet,
            SockType::Datagram,
            SockFlag::SOCK_CLOEXEC,
            None,
        )?;
        trace!("ethtool: opened socket fd {}", fd.as_raw_fd());
        Ok(Self { fd })
    }

    /// Issue `SIOCETHTOOL` with `data` as the command buffer
    ///
    /// # Safety
    ///
    /// `data` must point to a buffer that is valid for reads and writes of
    /// the size the kernel expects for the command in its first `u32`.
    unsafe fn ethtool(&self, ifname: &IfName, data: *mut libc::c_void) -> io::Result<()> {
        let mut ifr = IfReq::new(ifname, data);
        siocethtool(self.fd.as_raw_fd(), &mut ifr)?;
        Ok(())
    }
}

impl ControlChannel for EthtoolSocket {
    fn driver_info(&mut self, ifname: &IfName) -> io::Result<DriverName> {
        let mut info = EthtoolDrvinfo::query();

        // SAFETY: info is a complete ethtool_drvinfo, which is what
        // ETHTOOL_GDRVINFO reads and fills
        unsafe { self.ethtool(ifname, (&mut info as *mut EthtoolDrvinfo).cast())? };

        let driver = DriverName::from_c_bytes(&info.driver);
        trace!(
            "ethtool: {} driver={} version={} bus={}",
            ifname,
            driver,
            DriverName::from_c_bytes(&info.version),
            DriverName::from_c_bytes(&info.bus_info)
        );
        Ok(driver)
    }

    fn register_request(&mut self, ifname: &IfName, request: &mut RegisterAccess) -> io::Result<()> {
        let mut buf: [u8; ENCODED_LEN] = request.encode();

        // SAFETY: buf holds the full {cmd, address, value} record the
        // register commands read and write
        unsafe { self.ethtool(ifname, buf.as_mut_ptr().cast())? };

        *request = RegisterAccess::decode(&buf);
        Ok(())
    }
}
