//! Configuration of the identity data sources.
//!
//! Every file path and interface name the resolver consults is configurable
//! so deployments can relocate the backing files and tests can point the
//! resolver at fixtures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Locations of the identity sources consulted during field resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SourcesConfig {
    /// `KEY=VALUE` device properties file.
    pub device_properties: PathBuf,

    /// Kernel cpuinfo file (`Key : value` lines).
    pub cpuinfo: PathBuf,

    /// Firmware version manifest (`key:value` lines).
    pub version_file: PathBuf,

    /// Primary wired interface queried for MAC-derived fields.
    #[validate(length(min = 1, message = "Wired interface name must not be empty"))]
    pub wired_interface: String,

    /// Primary wireless interface queried for the WiFi MAC.
    #[validate(length(min = 1, message = "Wireless interface name must not be empty"))]
    pub wireless_interface: String,

    /// Bluetooth controller index queried for the BD address.
    pub bluetooth_device: u16,

    /// Lock file used for single-instance enforcement (only consulted when
    /// the `instance-lock` feature is compiled in).
    pub lock_file: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            device_properties: PathBuf::from("/etc/device.properties"),
            cpuinfo: PathBuf::from("/proc/cpuinfo"),
            version_file: PathBuf::from("/version.txt"),
            wired_interface: "eth0".to_string(),
            wireless_interface: "wlan0".to_string(),
            bluetooth_device: 0,
            lock_file: PathBuf::from("/run/devident.lock"),
        }
    }
}
