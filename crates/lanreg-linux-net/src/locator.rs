//! Interface discovery through procfs and sysfs
//!
//! The live interface listing in `/proc/net/dev` gives one line per
//! interface, name first:
//!
//! ```text
//! Inter-|   Receive                            ...
//!  face |bytes    packets errs drop fifo frame ...
//!     lo:  123456     789    0    0    0     0 ...
//!   eth0:  654321     987    0    0    0     0 ...
//! ```
//!
//! For every candidate the bound kernel module is found by resolving
//! `/sys/class/net/<name>/device/driver/module`, which links to
//! `/sys/module/<module>`.

use crate::error::{LocateError, Result};
use lanreg_core::IfName;
use log::{debug, info, trace};
use std::fs;
use std::path::{Path, PathBuf};

/// Live interface listing
const PROC_NET_DEV: &str = "/proc/net/dev";

/// Sysfs network class root
const SYSFS_NET: &str = "/sys/class/net";

/// Default interface name pattern
const NAME_PATTERN: &str = "eth";

/// Header lines at the top of `/proc/net/dev`
const HEADER_LINES: usize = 2;

/// Where and how to look for interfaces
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Interface listing (default: `/proc/net/dev`)
    pub proc_net_dev: PathBuf,
    /// Sysfs network class directory (default: `/sys/class/net`)
    pub sysfs_net: PathBuf,
    /// Substring candidate interface names must contain (default: `eth`)
    pub name_pattern: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            proc_net_dev: PathBuf::from(PROC_NET_DEV),
            sysfs_net: PathBuf::from(SYSFS_NET),
            name_pattern: NAME_PATTERN.to_string(),
        }
    }
}

impl LocatorConfig {
    /// Configuration for the running system
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the interface listing from another file
    pub fn with_proc_net_dev(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_net_dev = path.into();
        self
    }

    /// Resolve driver links below another sysfs directory
    pub fn with_sysfs_net(mut self, path: impl Into<PathBuf>) -> Self {
        self.sysfs_net = path.into();
        self
    }

    /// Consider interfaces whose name contains `pattern`
    pub fn with_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = pattern.into();
        self
    }
}

/// A candidate interface and the module its device is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Interface name
    pub name: IfName,
    /// Kernel module name, `None` if the driver link could not be read
    pub module: Option<String>,
}

/// Finds the interface bound to a given driver
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: LocatorConfig,
}

impl Locator {
    /// Create a locator
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Return the first candidate whose module name contains `driver`
    ///
    /// Candidates whose driver link is missing or unreadable are skipped.
    pub fn locate(&self, driver: &str) -> Result<IfName> {
        debug!(
            "Looking for a '{}' interface in {}",
            driver,
            self.config.proc_net_dev.display()
        );

        for name in self.candidate_names()? {
            match self.module_of(&name) {
                Some(module) if module.contains(driver) => {
                    info!("Found {} interface: {}", module, name);
                    return Ok(name);
                }
                Some(module) => debug!("{}: bound to {}, skipping", name, module),
                None => debug!("{}: no driver module link, skipping", name),
            }
        }

        Err(LocateError::NotFound {
            driver: driver.to_string(),
        })
    }

    /// Every candidate interface with its resolved module
    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self
            .candidate_names()?
            .into_iter()
            .map(|name| {
                let module = self.module_of(&name);
                Candidate { name, module }
            })
            .collect())
    }

    fn candidate_names(&self) -> Result<Vec<IfName>> {
        let path = &self.config.proc_net_dev;
        let listing = fs::read_to_string(path).map_err(|e| LocateError::ListingRead {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(parse_listing(&listing)
            .filter(|name| name.contains(self.config.name_pattern.as_str()))
            .filter_map(|name| match IfName::new(name) {
                Ok(name) => Some(name),
                Err(e) => {
                    debug!("Ignoring interface '{}': {}", name, e);
                    None
                }
            })
            .collect())
    }

    /// Module backing the device of `ifname`, from the driver's module link
    fn module_of(&self, ifname: &IfName) -> Option<String> {
        let link = self
            .config
            .sysfs_net
            .join(ifname.as_str())
            .join("device/driver/module");

        match fs::read_link(&link) {
            Ok(target) => module_name(&target),
            Err(e) => {
                trace!("read_link({}) failed: {}", link.display(), e);
                None
            }
        }
    }
}

/// Interface names from a `/proc/net/dev` listing, leading whitespace removed
fn parse_listing(listing: &str) -> impl Iterator<Item = &str> {
    listing
        .lines()
        .skip(HEADER_LINES)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.trim_start())
        .filter(|name| !name.is_empty())
}

/// Final path component of a module link target
fn module_name(target: &Path) -> Option<String> {
    target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    const HEADER: &str = "Inter-|   Receive                                                |  Transmit\n \
face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n";

    /// Fake procfs/sysfs tree
    struct Fixture {
        dir: TempDir,
        listing: String,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir_all(dir.path().join("sys/class/net")).unwrap();
            fs::create_dir_all(dir.path().join("sys/module")).unwrap();
            Self {
                dir,
                listing: HEADER.to_string(),
            }
        }

        /// Add an interface line, optionally with a device bound to `module`
        fn interface(mut self, name: &str, module: Option<&str>) -> Self {
            self.listing.push_str(&format!(
                "{:>6}:  123456     789    0    0    0     0          0         0   654321     987    0    0    0     0       0          0\n",
                name
            ));

            let driver = self.dir.path().join(format!("sys/drivers/{name}"));
            fs::create_dir_all(&driver).unwrap();
            let device = self.dir.path().join(format!("sys/class/net/{name}/device"));
            fs::create_dir_all(&device).unwrap();
            symlink(&driver, device.join("driver")).unwrap();

            if let Some(module) = module {
                let module_dir = self.dir.path().join(format!("sys/module/{module}"));
                fs::create_dir_all(&module_dir).unwrap();
                symlink(&module_dir, driver.join("module")).unwrap();
            }
            self
        }

        fn locator(&self) -> Locator {
            let proc_net_dev = self.dir.path().join("net_dev");
            fs::write(&proc_net_dev, &self.listing).unwrap();
            Locator::new(
                LocatorConfig::new()
                    .with_proc_net_dev(proc_net_dev)
                    .with_sysfs_net(self.dir.path().join("sys/class/net")),
            )
        }
    }

    #[test]
    fn test_finds_single_match() {
        let fixture = Fixture::new()
            .interface("lo", None)
            .interface("eth0", Some("lan865x"));

        let name = fixture.locator().locate("lan865x").unwrap();
        assert_eq!(name.as_str(), "eth0");
    }

    #[test]
    fn test_first_match_wins() {
        let fixture = Fixture::new()
            .interface("eth0", Some("r8169"))
            .interface("eth1", Some("lan865x"))
            .interface("eth2", Some("lan865x"));

        assert_eq!(fixture.locator().locate("lan865x").unwrap().as_str(), "eth1");
    }

    #[test]
    fn test_no_match_is_not_found() {
        let fixture = Fixture::new()
            .interface("lo", None)
            .interface("eth0", Some("r8169"))
            .interface("wlan0", Some("lan865x"));

        let err = fixture.locator().locate("lan865x").unwrap_err();
        assert!(matches!(err, LocateError::NotFound { ref driver } if driver == "lan865x"));
    }

    #[test]
    fn test_unreadable_driver_link_is_skipped() {
        let mut fixture = Fixture::new()
            .interface("eth0", None)
            .interface("eth1", Some("lan865x"));

        // eth2 is listed but has no sysfs entry at all
        fixture.listing.push_str("  eth2: 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n");

        let locator = fixture.locator();
        assert_eq!(locator.locate("lan865x").unwrap().as_str(), "eth1");

        let candidates = locator.candidates().unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].module, None);
        assert_eq!(candidates[1].module.as_deref(), Some("lan865x"));
        assert_eq!(candidates[2].module, None);
    }

    #[test]
    fn test_module_name_is_substring_matched() {
        let fixture = Fixture::new().interface("eth0", Some("microchip_lan865x"));
        assert_eq!(fixture.locator().locate("lan865x").unwrap().as_str(), "eth0");
    }

    #[test]
    fn test_missing_listing() {
        let locator = Locator::new(LocatorConfig::new().with_proc_net_dev("/nonexistent/net/dev"));
        let err = locator.locate("lan865x").unwrap_err();
        assert!(matches!(err, LocateError::ListingRead { .. }));
    }

    #[test]
    fn test_custom_name_pattern() {
        let fixture = Fixture::new().interface("t1s0", Some("lan865x"));
        let mut locator = fixture.locator();
        assert!(locator.locate("lan865x").is_err());

        locator.config = locator.config.clone().with_name_pattern("t1s");
        assert_eq!(locator.locate("lan865x").unwrap().as_str(), "t1s0");
    }

    #[test]
    fn test_parse_listing_strips_leading_whitespace() {
        let listing = format!("{HEADER}    lo: 1 2 3\n  eth0: 4 5 6\neth10:7 8 9\ngarbage\n");
        let names: Vec<&str> = parse_listing(&listing).collect();
        assert_eq!(names, ["lo", "eth0", "eth10"]);
    }

    #[test]
    fn test_module_name_from_link_target() {
        assert_eq!(
            module_name(Path::new("../../../../module/lan865x")).as_deref(),
            Some("lan865x")
        );
        assert_eq!(module_name(Path::new("/")), None);
    }
}
