use std::io;

use tracing::trace;

use super::netif::format_mac;
use crate::core::{error::SourceError, types::SourceResult};

/// Device-info query against a Bluetooth controller.
///
/// The production implementation queries the HCI device directly rather
/// than scraping `hciconfig` output; the controller is pinned by index, so
/// multi-controller hosts behave deterministically.
pub trait BtQuery: Send + Sync {
    fn controller_address(&self) -> SourceResult<[u8; 6]>;
}

/// Formats a controller address as uppercase colon-separated hex.
///
/// The kernel hands `bdaddr` back little-endian, so the bytes are reversed
/// before formatting.
pub fn format_bd_address(bdaddr: &[u8; 6]) -> String {
    let mut octets = *bdaddr;
    octets.reverse();
    format_mac(&octets)
}

const BTPROTO_HCI: libc::c_int = 1;
// _IOR('H', 211, int)
const HCIGETDEVINFO: libc::c_ulong = 0x800448d3;

#[repr(C)]
#[derive(Clone, Copy)]
struct HciDevStats {
    err_rx: u32,
    err_tx: u32,
    cmd_tx: u32,
    evt_rx: u32,
    acl_tx: u32,
    acl_rx: u32,
    sco_tx: u32,
    sco_rx: u32,
    byte_rx: u32,
    byte_tx: u32,
}

/// Layout of `struct hci_dev_info` from the kernel's Bluetooth UAPI. Only
/// `dev_id` and `bdaddr` are consumed, but the kernel fills the whole
/// struct, so the full layout must be present.
#[repr(C)]
#[derive(Clone, Copy)]
struct HciDevInfo {
    dev_id: u16,
    name: [u8; 8],
    bdaddr: [u8; 6],
    flags: u32,
    dev_type: u8,
    features: [u8; 8],
    pkt_type: u32,
    link_policy: u32,
    link_mode: u32,
    acl_mtu: u16,
    acl_pkts: u16,
    sco_mtu: u16,
    sco_pkts: u16,
    stat: HciDevStats,
}

/// `BtQuery` backed by `HCIGETDEVINFO` on a raw HCI socket.
pub struct HciBtQuery {
    device_id: u16,
}

impl HciBtQuery {
    pub fn new(device_id: u16) -> Self {
        HciBtQuery { device_id }
    }
}

impl BtQuery for HciBtQuery {
    fn controller_address(&self) -> SourceResult<[u8; 6]> {
        let fd = unsafe {
            libc::socket(
                libc::AF_BLUETOOTH,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                BTPROTO_HCI,
            )
        };
        if fd < 0 {
            return Err(SourceError::SystemCall {
                syscall: "socket(AF_BLUETOOTH, SOCK_RAW)".to_string(),
                reason: io::Error::last_os_error().to_string(),
            });
        }

        let mut info: HciDevInfo = unsafe { std::mem::zeroed() };
        info.dev_id = self.device_id;

        let rc = unsafe { libc::ioctl(fd, HCIGETDEVINFO, &mut info) };
        let err = io::Error::last_os_error();
        unsafe { libc::close(fd) };

        if rc == -1 {
            return Err(SourceError::SystemCall {
                syscall: format!("ioctl(HCIGETDEVINFO, hci{})", self.device_id),
                reason: err.to_string(),
            });
        }

        trace!(
            device = self.device_id,
            address = %format_bd_address(&info.bdaddr),
            "bluetooth controller query"
        );
        Ok(info.bdaddr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bd_address_is_reversed_before_formatting() {
        // Stored little-endian: 82:F4:56:01:5F:E4 on the wire is
        // E4:5F:01:56:F4:82 to the user.
        let stored = [0x82, 0xf4, 0x56, 0x01, 0x5f, 0xe4];
        assert_eq!(format_bd_address(&stored), "E4:5F:01:56:F4:82");
    }

    #[test]
    fn reversal_is_its_own_inverse() {
        let stored = [1, 2, 3, 4, 5, 6];
        assert_eq!(format_bd_address(&stored), "06:05:04:03:02:01");
    }

    #[test]
    fn dev_info_layout_matches_the_kernel_header() {
        // 2 + 8 + 6 + 4 + 1 + 8 (+3 pad) + 4 + 4 + 4 + 2*4 + 40 = 92
        assert_eq!(std::mem::size_of::<HciDevInfo>(), 92);
        assert_eq!(std::mem::size_of::<HciDevStats>(), 40);
    }
}
