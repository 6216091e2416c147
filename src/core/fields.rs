use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one piece of device-identity data.
///
/// The discriminants form a contiguous range in the management wire order;
/// raw values coming over the boundary are validated with
/// [`FieldId::is_valid_raw`] before they are mapped to a variant. The
/// lowercase names match the strings the CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum FieldId {
    Manufacturer,
    ManufacturerOui,
    ModelName,
    Description,
    ProductClass,
    SerialNumber,
    HardwareVersion,
    SoftwareVersion,
    ProvisioningCode,
    FirstUseDate,
    DeviceMac,
    MocaMac,
    HdmiHdcp,
    PdriVersion,
    WifiMac,
    BluetoothMac,
    WpsPin,
    ManufacturingSerialNumber,
    EthernetMac,
    EstbMac,
    Rf4ceMac,
    ProvisionedModelName,
    Pmi,
    HwId,
    ModelNumber,
    SocId,
    ImageName,
    ImageType,
    BlVersion,
    Region,
    BdriVersion,
    LedWhiteLevel,
    LedPattern,
}

/// First raw value of the extended panel serialization block.
#[cfg(feature = "panel-types")]
pub const PANEL_MIN_RAW: u32 = 0x51;

/// Last raw value of the extended panel serialization block.
#[cfg(feature = "panel-types")]
pub const PANEL_MAX_RAW: u32 = 0x5a;

impl FieldId {
    /// Number of identifiers in the base range.
    pub const COUNT: u32 = 33;

    /// Every identifier, in wire order. Used by the CLI batch mode and by
    /// table-coverage checks.
    pub const ALL: [FieldId; Self::COUNT as usize] = [
        FieldId::Manufacturer,
        FieldId::ManufacturerOui,
        FieldId::ModelName,
        FieldId::Description,
        FieldId::ProductClass,
        FieldId::SerialNumber,
        FieldId::HardwareVersion,
        FieldId::SoftwareVersion,
        FieldId::ProvisioningCode,
        FieldId::FirstUseDate,
        FieldId::DeviceMac,
        FieldId::MocaMac,
        FieldId::HdmiHdcp,
        FieldId::PdriVersion,
        FieldId::WifiMac,
        FieldId::BluetoothMac,
        FieldId::WpsPin,
        FieldId::ManufacturingSerialNumber,
        FieldId::EthernetMac,
        FieldId::EstbMac,
        FieldId::Rf4ceMac,
        FieldId::ProvisionedModelName,
        FieldId::Pmi,
        FieldId::HwId,
        FieldId::ModelNumber,
        FieldId::SocId,
        FieldId::ImageName,
        FieldId::ImageType,
        FieldId::BlVersion,
        FieldId::Region,
        FieldId::BdriVersion,
        FieldId::LedWhiteLevel,
        FieldId::LedPattern,
    ];

    /// Maps a raw wire value to an identifier. Returns `None` outside the
    /// base range, including for panel raw values, which are valid but have
    /// no variant on this platform.
    pub fn from_raw(raw: u32) -> Option<FieldId> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Range check over the base range `[0, COUNT)`, extended by the panel
    /// serialization block when the `panel-types` feature is enabled.
    pub fn is_valid_raw(raw: u32) -> bool {
        if raw < Self::COUNT {
            return true;
        }
        #[cfg(feature = "panel-types")]
        if (PANEL_MIN_RAW..=PANEL_MAX_RAW).contains(&raw) {
            return true;
        }
        false
    }

    /// Raw wire value of this identifier.
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// The CLI-visible name.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::Manufacturer => "manufacturer",
            FieldId::ManufacturerOui => "manufactureroui",
            FieldId::ModelName => "modelname",
            FieldId::Description => "description",
            FieldId::ProductClass => "productclass",
            FieldId::SerialNumber => "serialnumber",
            FieldId::HardwareVersion => "hardwareversion",
            FieldId::SoftwareVersion => "softwareversion",
            FieldId::ProvisioningCode => "provisioningcode",
            FieldId::FirstUseDate => "firstusedate",
            FieldId::DeviceMac => "devicemac",
            FieldId::MocaMac => "mocamac",
            FieldId::HdmiHdcp => "hdmihdcp",
            FieldId::PdriVersion => "pdriversion",
            FieldId::WifiMac => "wifimac",
            FieldId::BluetoothMac => "bluetoothmac",
            FieldId::WpsPin => "wpspin",
            FieldId::ManufacturingSerialNumber => "manufacturingserialnumber",
            FieldId::EthernetMac => "ethernetmac",
            FieldId::EstbMac => "estbmac",
            FieldId::Rf4ceMac => "rf4cemac",
            FieldId::ProvisionedModelName => "provisionedmodelname",
            FieldId::Pmi => "pmi",
            FieldId::HwId => "hwid",
            FieldId::ModelNumber => "modelnumber",
            FieldId::SocId => "socid",
            FieldId::ImageName => "imagename",
            FieldId::ImageType => "imagetype",
            FieldId::BlVersion => "blversion",
            FieldId::Region => "region",
            FieldId::BdriVersion => "bdriversion",
            FieldId::LedWhiteLevel => "ledwhitelevel",
            FieldId::LedPattern => "ledpattern",
        }
    }

    /// Looks an identifier up by its CLI-visible name. Case sensitive.
    pub fn from_name(name: &str) -> Option<FieldId> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_is_contiguous() {
        for (index, field) in FieldId::ALL.iter().enumerate() {
            assert_eq!(field.raw(), index as u32);
            assert_eq!(FieldId::from_raw(index as u32), Some(*field));
        }
    }

    #[test]
    fn raw_range_check() {
        assert!(FieldId::is_valid_raw(0));
        assert!(FieldId::is_valid_raw(FieldId::COUNT - 1));
        assert!(!FieldId::is_valid_raw(FieldId::COUNT));
        assert!(!FieldId::is_valid_raw(u32::MAX));
        assert_eq!(FieldId::from_raw(FieldId::COUNT), None);
    }

    #[cfg(feature = "panel-types")]
    #[test]
    fn panel_range_is_valid_but_unmapped() {
        assert!(FieldId::is_valid_raw(PANEL_MIN_RAW));
        assert!(FieldId::is_valid_raw(PANEL_MAX_RAW));
        assert!(!FieldId::is_valid_raw(PANEL_MAX_RAW + 1));
        assert_eq!(FieldId::from_raw(PANEL_MIN_RAW), None);
    }

    #[test]
    fn names_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_name(field.name()), Some(field));
        }
        assert_eq!(FieldId::from_name("manufactureroui"), Some(FieldId::ManufacturerOui));
        assert_eq!(FieldId::from_name("Manufacturer"), None);
        assert_eq!(FieldId::from_name(""), None);
    }

    #[test]
    fn serde_names_match_cli_names() {
        for field in FieldId::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(FieldId::EstbMac.to_string(), "estbmac");
        assert_eq!(FieldId::ManufacturingSerialNumber.to_string(), "manufacturingserialnumber");
    }
}
