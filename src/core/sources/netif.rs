use std::io;

use tracing::trace;

use crate::core::{error::SourceError, types::SourceResult};

/// Hardware-address query for a named network interface.
///
/// The production implementation issues a device ioctl; tests substitute a
/// fake so resolution can be exercised without real interfaces, and so the
/// "no I/O performed" properties can be asserted.
pub trait MacQuery: Send + Sync {
    fn hardware_address(&self, interface: &str) -> SourceResult<[u8; 6]>;
}

/// Formats six hardware-address octets as uppercase colon-separated hex,
/// 17 characters exactly.
pub fn format_mac(octets: &[u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        octets[0], octets[1], octets[2], octets[3], octets[4], octets[5]
    )
}

/// Derives the manufacturer OUI from a formatted MAC string: the first six
/// hex characters with colons stripped, e.g. `E4:5F:01:56:F4:82` ->
/// `E45F01`. A local convention on this platform, not an IEEE registry
/// lookup.
pub fn oui_from_mac(mac: &str) -> String {
    mac.chars().filter(|c| *c != ':').take(6).collect()
}

/// `MacQuery` backed by a `SIOCGIFHWADDR` ioctl on a throwaway datagram
/// socket. The socket carries no traffic; it exists only to address the
/// query at the interface.
pub struct IoctlMacQuery;

impl MacQuery for IoctlMacQuery {
    fn hardware_address(&self, interface: &str) -> SourceResult<[u8; 6]> {
        if interface.is_empty() || interface.len() >= libc::IFNAMSIZ {
            return Err(SourceError::InvalidInput(format!(
                "bad interface name '{interface}'"
            )));
        }

        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            return Err(SourceError::SystemCall {
                syscall: "socket(AF_INET, SOCK_DGRAM)".to_string(),
                reason: io::Error::last_os_error().to_string(),
            });
        }

        let mut ifr: libc::ifreq = unsafe { std::mem::zeroed() };
        for (dst, src) in ifr.ifr_name.iter_mut().zip(interface.as_bytes()) {
            *dst = *src as libc::c_char;
        }

        let rc = unsafe { libc::ioctl(fd, libc::SIOCGIFHWADDR, &mut ifr) };
        let err = io::Error::last_os_error();
        unsafe { libc::close(fd) };

        if rc == -1 {
            return Err(SourceError::SystemCall {
                syscall: format!("ioctl(SIOCGIFHWADDR, {interface})"),
                reason: err.to_string(),
            });
        }

        let data = unsafe { ifr.ifr_ifru.ifru_hwaddr.sa_data };
        let mut octets = [0u8; 6];
        for (dst, src) in octets.iter_mut().zip(data.iter()) {
            *dst = *src as u8;
        }
        trace!(interface, mac = %format_mac(&octets), "hardware address query");
        Ok(octets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_formats_uppercase_colon_separated() {
        let mac = format_mac(&[0xe4, 0x5f, 0x01, 0x56, 0xf4, 0x82]);
        assert_eq!(mac, "E4:5F:01:56:F4:82");
        assert_eq!(mac.len(), 17);
    }

    #[test]
    fn zero_address_formats_cleanly() {
        assert_eq!(format_mac(&[0; 6]), "00:00:00:00:00:00");
    }

    #[test]
    fn oui_strips_colons_and_takes_six_chars() {
        assert_eq!(oui_from_mac("E4:5F:01:56:F4:82"), "E45F01");
    }

    #[test]
    fn oui_of_short_input_takes_what_exists() {
        assert_eq!(oui_from_mac("E4:5F"), "E45F");
        assert_eq!(oui_from_mac(""), "");
    }

    #[test]
    fn ioctl_query_rejects_bad_interface_names() {
        let query = IoctlMacQuery;
        assert!(matches!(
            query.hardware_address(""),
            Err(SourceError::InvalidInput(_))
        ));
        assert!(matches!(
            query.hardware_address("an-interface-name-way-beyond-ifnamsiz"),
            Err(SourceError::InvalidInput(_))
        ));
    }

    #[test]
    fn ioctl_query_fails_for_a_missing_interface() {
        let query = IoctlMacQuery;
        let err = query.hardware_address("no-such-if0").unwrap_err();
        assert!(matches!(err, SourceError::SystemCall { .. }));
    }
}
