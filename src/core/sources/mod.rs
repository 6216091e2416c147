//! Retrieval backends for the field resolver.
//!
//! Three line-oriented text readers (device properties, cpuinfo, version
//! manifest) and two device probes (interface MAC, Bluetooth controller
//! address). Each backend reports rich [`SourceError`] detail; the resolver
//! collapses it into the public outcome taxonomy.
//!
//! [`SourceError`]: crate::core::error::SourceError

/// Bluetooth controller address probe.
pub mod bluetooth;

/// `/proc/cpuinfo`-style `Key : value` reader.
pub mod cpuinfo;

/// Network-interface MAC probe and manufacturer-OUI derivation.
pub mod netif;

/// `KEY=VALUE` device-properties reader.
pub mod properties;

/// Version-manifest reader with a configurable separator.
pub mod version;

pub use bluetooth::{format_bd_address, BtQuery, HciBtQuery};
pub use netif::{format_mac, oui_from_mac, IoctlMacQuery, MacQuery};

use crate::config::sources::SourcesConfig;

/// Everything a retrieval strategy needs: the configured source locations
/// plus the device probes.
///
/// Probes are trait objects so tests can substitute recording fakes and
/// assert which queries a resolution did (or did not) perform.
pub struct SourceContext {
    pub sources: SourcesConfig,
    pub mac: Box<dyn MacQuery>,
    pub bt: Box<dyn BtQuery>,
}

impl SourceContext {
    /// Builds a context with the production probes.
    pub fn new(sources: SourcesConfig) -> Self {
        let bt = HciBtQuery::new(sources.bluetooth_device);
        SourceContext {
            sources,
            mac: Box::new(IoctlMacQuery),
            bt: Box::new(bt),
        }
    }

    /// Builds a context around caller-supplied probes.
    pub fn with_probes(
        sources: SourcesConfig,
        mac: Box<dyn MacQuery>,
        bt: Box<dyn BtQuery>,
    ) -> Self {
        SourceContext { sources, mac, bt }
    }
}
