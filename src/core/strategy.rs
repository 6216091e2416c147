//! The data-driven field dispatch table.
//!
//! Each supported [`FieldId`] maps to exactly one retrieval strategy — a
//! small object implementing the single [`FieldStrategy::fetch`] capability
//! — and the resolver evaluates every entry through one uniform
//! allocate/attempt/release skeleton. Adding a field is a table entry plus
//! a strategy implementation; fields with no entry are unsupported.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{
    fields::FieldId,
    sources::{bluetooth, cpuinfo, netif, properties, version, SourceContext},
    types::SourceResult,
};

/// Default description reported for this reference device.
pub const DEFAULT_DESCRIPTION: &str = "RaspberryPi RDKV Reference Device";
/// Default product class.
pub const DEFAULT_PRODUCT_CLASS: &str = "RDKV";
/// Default software version.
pub const DEFAULT_SOFTWARE_VERSION: &str = "2.0";

/// Device-properties key naming the MoCA interface.
const MOCA_INTERFACE_KEY: &str = "MOCA_INTERFACE";

/// One retrieval strategy bound to a field identifier.
///
/// A strategy writes the resolved value into the buffer the resolver
/// reserved for it and reports source-level failure detail; it performs no
/// outcome mapping of its own.
pub trait FieldStrategy: Send + Sync {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()>;
}

/// Key-value lookup in the device properties file.
struct PropertiesKey {
    key: &'static str,
}

impl FieldStrategy for PropertiesKey {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let value = properties::value_for_key(&ctx.sources.device_properties, self.key)?;
        out.push_str(&value);
        Ok(())
    }
}

/// Key lookup in the kernel cpuinfo file.
struct CpuInfoKey {
    key: &'static str,
}

impl FieldStrategy for CpuInfoKey {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let value = cpuinfo::value_for_key(&ctx.sources.cpuinfo, self.key)?;
        out.push_str(&value);
        Ok(())
    }
}

/// Key lookup in the version manifest.
struct VersionKey {
    key: &'static str,
    separator: char,
}

impl FieldStrategy for VersionKey {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let value = version::value_for_key(&ctx.sources.version_file, self.key, self.separator)?;
        out.push_str(&value);
        Ok(())
    }
}

/// Which configured interface a MAC strategy queries.
enum InterfaceRole {
    Wired,
    Wireless,
}

/// Hardware-address probe on the primary wired or wireless interface.
struct InterfaceMac {
    role: InterfaceRole,
}

impl FieldStrategy for InterfaceMac {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let interface = match self.role {
            InterfaceRole::Wired => ctx.sources.wired_interface.as_str(),
            InterfaceRole::Wireless => ctx.sources.wireless_interface.as_str(),
        };
        let octets = ctx.mac.hardware_address(interface)?;
        out.push_str(&netif::format_mac(&octets));
        Ok(())
    }
}

/// Manufacturer OUI derived from the wired interface's MAC.
struct OuiFromWiredMac;

impl FieldStrategy for OuiFromWiredMac {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let octets = ctx.mac.hardware_address(&ctx.sources.wired_interface)?;
        out.push_str(&netif::oui_from_mac(&netif::format_mac(&octets)));
        Ok(())
    }
}

/// Two-stage MoCA strategy: the interface name comes from the device
/// properties file, then that interface is probed. A missing
/// `MOCA_INTERFACE` key fails before any probe is issued.
struct MocaInterfaceMac;

impl FieldStrategy for MocaInterfaceMac {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let interface =
            properties::value_for_key(&ctx.sources.device_properties, MOCA_INTERFACE_KEY)?;
        let octets = ctx.mac.hardware_address(&interface)?;
        out.push_str(&netif::format_mac(&octets));
        Ok(())
    }
}

/// Bluetooth controller address probe.
struct BluetoothAddress;

impl FieldStrategy for BluetoothAddress {
    fn fetch(&self, ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        let bdaddr = ctx.bt.controller_address()?;
        out.push_str(&bluetooth::format_bd_address(&bdaddr));
        Ok(())
    }
}

/// Static default for fields with no live source.
struct StaticValue {
    value: &'static str,
}

impl FieldStrategy for StaticValue {
    fn fetch(&self, _ctx: &SourceContext, out: &mut String) -> SourceResult<()> {
        out.push_str(self.value);
        Ok(())
    }
}

/// Maps every supported field to its strategy. Fields absent from the
/// table are unsupported: no buffer is allocated and no I/O is performed
/// for them.
pub struct StrategyTable {
    entries: HashMap<FieldId, Box<dyn FieldStrategy>>,
}

impl StrategyTable {
    pub fn new() -> Self {
        let mut entries: HashMap<FieldId, Box<dyn FieldStrategy>> = HashMap::new();

        entries.insert(
            FieldId::Manufacturer,
            Box::new(PropertiesKey { key: "MANUFACTURE" }),
        );
        entries.insert(FieldId::ManufacturerOui, Box::new(OuiFromWiredMac));
        entries.insert(
            FieldId::ModelName,
            Box::new(PropertiesKey { key: "DEVICE_NAME" }),
        );
        entries.insert(
            FieldId::Description,
            Box::new(StaticValue { value: DEFAULT_DESCRIPTION }),
        );
        entries.insert(
            FieldId::ProductClass,
            Box::new(StaticValue { value: DEFAULT_PRODUCT_CLASS }),
        );
        entries.insert(FieldId::SerialNumber, Box::new(CpuInfoKey { key: "Serial" }));
        entries.insert(
            FieldId::ManufacturingSerialNumber,
            Box::new(CpuInfoKey { key: "Serial" }),
        );
        entries.insert(
            FieldId::HardwareVersion,
            Box::new(CpuInfoKey { key: "Revision" }),
        );
        entries.insert(
            FieldId::SoftwareVersion,
            Box::new(StaticValue { value: DEFAULT_SOFTWARE_VERSION }),
        );
        entries.insert(
            FieldId::DeviceMac,
            Box::new(InterfaceMac { role: InterfaceRole::Wired }),
        );
        entries.insert(
            FieldId::EthernetMac,
            Box::new(InterfaceMac { role: InterfaceRole::Wired }),
        );
        entries.insert(
            FieldId::EstbMac,
            Box::new(InterfaceMac { role: InterfaceRole::Wired }),
        );
        entries.insert(
            FieldId::WifiMac,
            Box::new(InterfaceMac { role: InterfaceRole::Wireless }),
        );
        entries.insert(FieldId::MocaMac, Box::new(MocaInterfaceMac));
        entries.insert(FieldId::BluetoothMac, Box::new(BluetoothAddress));
        entries.insert(FieldId::HwId, Box::new(CpuInfoKey { key: "Revision" }));
        entries.insert(FieldId::ModelNumber, Box::new(CpuInfoKey { key: "Revision" }));
        entries.insert(FieldId::SocId, Box::new(CpuInfoKey { key: "Hardware" }));
        entries.insert(
            FieldId::ImageName,
            Box::new(VersionKey { key: "imagename", separator: ':' }),
        );

        StrategyTable { entries }
    }

    /// Retrieves the strategy for a field, if one exists.
    pub fn get(&self, field: FieldId) -> Option<&dyn FieldStrategy> {
        self.entries.get(&field).map(|s| s.as_ref())
    }

    /// Whether the field has a backing strategy.
    pub fn supports(&self, field: FieldId) -> bool {
        self.entries.contains_key(&field)
    }

    /// Number of supported fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no strategies are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a reference to the shared table. The table is stateless;
    /// per-instance data lives in the `SourceContext`.
    pub fn global() -> &'static StrategyTable {
        &GLOBAL_TABLE
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_TABLE: Lazy<StrategyTable> = Lazy::new(StrategyTable::new);

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: [FieldId; 19] = [
        FieldId::Manufacturer,
        FieldId::ManufacturerOui,
        FieldId::ModelName,
        FieldId::Description,
        FieldId::ProductClass,
        FieldId::SerialNumber,
        FieldId::ManufacturingSerialNumber,
        FieldId::HardwareVersion,
        FieldId::SoftwareVersion,
        FieldId::DeviceMac,
        FieldId::EthernetMac,
        FieldId::EstbMac,
        FieldId::WifiMac,
        FieldId::MocaMac,
        FieldId::BluetoothMac,
        FieldId::HwId,
        FieldId::ModelNumber,
        FieldId::SocId,
        FieldId::ImageName,
    ];

    #[test]
    fn table_covers_exactly_the_supported_set() {
        let table = StrategyTable::new();
        assert_eq!(table.len(), SUPPORTED.len());
        for field in SUPPORTED {
            assert!(table.supports(field), "missing strategy for {field}");
        }
    }

    #[test]
    fn unsupported_fields_have_no_entry() {
        let table = StrategyTable::new();
        for field in FieldId::ALL {
            if !SUPPORTED.contains(&field) {
                assert!(table.get(field).is_none(), "unexpected strategy for {field}");
            }
        }
    }

    #[test]
    fn global_table_is_a_singleton() {
        let first = StrategyTable::global();
        let second = StrategyTable::global();
        assert_eq!(first as *const _, second as *const _);
        assert!(!first.is_empty());
    }
}
