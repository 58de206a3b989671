//! Bounded names for kernel buffers
//!
//! The kernel exchanges interface and driver names through fixed-size,
//! NUL-terminated char arrays. [`IfName`] and [`DriverName`] hold at most the
//! number of bytes those arrays can carry before the terminator. The checked
//! constructors reject anything longer; the `truncating` constructors drop the
//! excess instead, which is what a plain `strncpy` into the kernel buffer does.

use crate::error::NameError;
use core::fmt;
use core::ops::Deref;

/// Size of `ifr_name` in `struct ifreq`, including the terminator
pub const IFNAMSIZ: usize = 16;

/// Size of `driver` in `struct ethtool_drvinfo`, including the terminator
pub const DRIVER_NAME_SIZE: usize = 32;

const IFNAME_MAX: usize = IFNAMSIZ - 1;
const DRIVER_NAME_MAX: usize = DRIVER_NAME_SIZE - 1;

/// Copy as many whole characters of `s` as fit into `N` bytes
fn truncate_into<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn bounded<const N: usize>(s: &str) -> Result<heapless::String<N>, NameError> {
    let mut out = heapless::String::new();
    out.push_str(s).map_err(|_| NameError::TooLong {
        name: s.to_string(),
        len: s.len(),
        max: N,
    })?;
    Ok(out)
}

/// Network interface name (e.g. `eth0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IfName(heapless::String<IFNAME_MAX>);

impl IfName {
    /// Create an interface name, rejecting names the kernel cannot hold
    ///
    /// Besides the length limit, the kernel refuses `/`, `:` (alias
    /// separator), NUL and whitespace in device names.
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(found) = name
            .chars()
            .find(|c| *c == '/' || *c == ':' || *c == '\0' || c.is_whitespace())
        {
            return Err(NameError::InvalidChar {
                name: name.to_string(),
                found,
            });
        }
        bounded(name).map(Self)
    }

    /// Create an interface name, silently dropping bytes past the kernel limit
    pub fn truncating(name: &str) -> Self {
        Self(truncate_into(name))
    }

    /// Borrow the name as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Copy the name into a zeroed `ifr_name` buffer
    ///
    /// The last byte always stays zero.
    pub fn to_c_buf(&self) -> [u8; IFNAMSIZ] {
        let mut buf = [0u8; IFNAMSIZ];
        let bytes = self.0.as_bytes();
        buf[..bytes.len()].copy_from_slice(bytes);
        buf
    }
}

impl Deref for IfName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IfName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kernel driver name as reported by the ethtool driver info query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DriverName(heapless::String<DRIVER_NAME_MAX>);

impl DriverName {
    /// Create a driver name, rejecting names longer than the drvinfo field
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        bounded(name).map(Self)
    }

    /// Create a driver name, silently dropping bytes past the drvinfo limit
    pub fn truncating(name: &str) -> Self {
        Self(truncate_into(name))
    }

    /// Decode a NUL-terminated C char array
    ///
    /// Bytes after the first NUL are ignored and invalid UTF-8 is replaced.
    pub fn from_c_bytes(bytes: &[u8]) -> Self {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self::truncating(&String::from_utf8_lossy(&bytes[..end]))
    }

    /// Borrow the name as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for DriverName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ifname_accepts_kernel_sized_names() {
        let name = IfName::new("eth0").unwrap();
        assert_eq!(name.as_str(), "eth0");

        let longest = "a".repeat(IFNAMSIZ - 1);
        assert_eq!(IfName::new(&longest).unwrap().len(), 15);
    }

    #[test]
    fn test_ifname_rejects_overlong_name() {
        let err = IfName::new("ethernet-adapter0").unwrap_err();
        assert_eq!(
            err,
            NameError::TooLong {
                name: "ethernet-adapter0".to_string(),
                len: 17,
                max: 15,
            }
        );
    }

    #[test]
    fn test_ifname_rejects_invalid_characters() {
        assert_eq!(IfName::new(""), Err(NameError::Empty));
        assert!(matches!(
            IfName::new("eth 0"),
            Err(NameError::InvalidChar { found: ' ', .. })
        ));
        assert!(matches!(
            IfName::new("../eth0"),
            Err(NameError::InvalidChar { found: '/', .. })
        ));
        assert!(matches!(
            IfName::new("eth0:1"),
            Err(NameError::InvalidChar { found: ':', .. })
        ));
        assert!(matches!(
            IfName::new("eth\00"),
            Err(NameError::InvalidChar { found: '\0', .. })
        ));
    }

    #[test]
    fn test_ifname_truncating_drops_excess() {
        let name = IfName::truncating("ethernet-adapter0");
        assert_eq!(name.as_str(), "ethernet-adapte");
        assert_eq!(name.len(), IFNAMSIZ - 1);

        // Multi-byte characters are never split
        let name = IfName::truncating("eth0-ééééééé");
        assert_eq!(name.as_str(), "eth0-ééééé");
    }

    #[test]
    fn test_ifname_c_buf_is_terminated() {
        let buf = IfName::truncating("abcdefghijklmnopq").to_c_buf();
        assert_eq!(&buf[..15], b"abcdefghijklmno");
        assert_eq!(buf[15], 0);

        let buf = IfName::new("eth1").unwrap().to_c_buf();
        assert_eq!(&buf[..5], b"eth1\0");
    }

    #[test]
    fn test_driver_name_from_c_bytes() {
        let mut raw = [0u8; DRIVER_NAME_SIZE];
        raw[..7].copy_from_slice(b"lan865x");
        raw[8] = b'x'; // garbage after the terminator
        assert_eq!(DriverName::from_c_bytes(&raw).as_str(), "lan865x");

        // No terminator: the whole field is used, capped at the limit
        let raw = [b'd'; DRIVER_NAME_SIZE];
        assert_eq!(DriverName::from_c_bytes(&raw).len(), DRIVER_NAME_SIZE - 1);
    }

    #[test]
    fn test_driver_name_limits() {
        assert!(DriverName::new("lan865x").is_ok());
        assert_eq!(DriverName::new(""), Err(NameError::Empty));
        assert!(DriverName::new(&"x".repeat(32)).is_err());
    }
}
