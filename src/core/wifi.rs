//! WiFi-credential boundary surface.
//!
//! Part of the management contract this shim must expose, with its own
//! result taxonomy. Nothing here carries logic: every operation validates
//! its arguments and the lifecycle state, then reports unsupported.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resolver::Resolver;

/// Outcomes of the WiFi-credential surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WifiError {
    #[error("library is not initialized")]
    NotInitialized,

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("operation is not supported on this platform")]
    Unsupported,
}

/// Credentials for a wireless network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
}

impl Resolver {
    /// Reads stored WiFi credentials. Not supported on this platform.
    pub fn wifi_credentials(&self) -> Result<WifiCredentials, WifiError> {
        self.ensure_initialized_wifi()?;
        Err(WifiError::Unsupported)
    }

    /// Stores WiFi credentials. Validates the arguments, then reports
    /// unsupported.
    pub fn set_wifi_credentials(&self, credentials: &WifiCredentials) -> Result<(), WifiError> {
        self.ensure_initialized_wifi()?;
        if credentials.ssid.is_empty() {
            return Err(WifiError::InvalidParam("empty ssid".to_string()));
        }
        if credentials.password.is_empty() {
            return Err(WifiError::InvalidParam("empty password".to_string()));
        }
        Err(WifiError::Unsupported)
    }

    /// Erases all stored WiFi data. Not supported on this platform.
    pub fn erase_wifi_data(&self) -> Result<(), WifiError> {
        self.ensure_initialized_wifi()?;
        Err(WifiError::Unsupported)
    }

    fn ensure_initialized_wifi(&self) -> Result<(), WifiError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(WifiError::NotInitialized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::tests::test_resolver;

    #[test]
    fn wifi_surface_requires_initialization() {
        let (resolver, _dir) = test_resolver();
        assert_eq!(resolver.wifi_credentials().unwrap_err(), WifiError::NotInitialized);
        assert_eq!(resolver.erase_wifi_data().unwrap_err(), WifiError::NotInitialized);
    }

    #[test]
    fn set_credentials_validates_arguments() {
        let (mut resolver, _dir) = test_resolver();
        resolver.init().expect("init");

        let empty_ssid = WifiCredentials {
            ssid: String::new(),
            password: "secret".to_string(),
        };
        assert!(matches!(
            resolver.set_wifi_credentials(&empty_ssid),
            Err(WifiError::InvalidParam(_))
        ));

        let empty_password = WifiCredentials {
            ssid: "HomeNet".to_string(),
            password: String::new(),
        };
        assert!(matches!(
            resolver.set_wifi_credentials(&empty_password),
            Err(WifiError::InvalidParam(_))
        ));

        let valid = WifiCredentials {
            ssid: "HomeNet".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(resolver.set_wifi_credentials(&valid), Err(WifiError::Unsupported));
    }

    #[test]
    fn everything_else_reports_unsupported() {
        let (mut resolver, _dir) = test_resolver();
        resolver.init().expect("init");
        assert_eq!(resolver.wifi_credentials().unwrap_err(), WifiError::Unsupported);
        assert_eq!(resolver.erase_wifi_data().unwrap_err(), WifiError::Unsupported);
    }
}
