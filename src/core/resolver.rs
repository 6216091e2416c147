//! The field resolver: lifecycle guard, uniform resolution loop, and the
//! stub boundary operations.

use std::path::Path;

use tracing::{debug, warn};

use super::{
    error::HalError,
    fields::FieldId,
    sources::SourceContext,
    strategy::StrategyTable,
    types::{HalResult, MAX_VALUE_LEN},
    value::ResolvedValue,
};
#[cfg(feature = "instance-lock")]
use super::lock::InstanceLock;
use crate::config::sources::SourcesConfig;

/// Bootloader LED/display pattern selector. Boundary contract only; no
/// pattern can be programmed on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BootPattern {
    Normal,
    SilentLedOn,
    Silent,
}

impl BootPattern {
    pub fn from_raw(raw: u32) -> Option<BootPattern> {
        match raw {
            0 => Some(BootPattern::Normal),
            1 => Some(BootPattern::SilentLedOn),
            2 => Some(BootPattern::Silent),
            _ => None,
        }
    }
}

/// Firmware image type accepted by the write-image boundary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ImageType {
    Cdl,
    Rcdl,
    Drm,
    PciApp,
    PciCritical,
    Vbn1,
    Vbn2,
}

impl ImageType {
    pub fn from_raw(raw: u32) -> Option<ImageType> {
        match raw {
            0 => Some(ImageType::Cdl),
            1 => Some(ImageType::Rcdl),
            2 => Some(ImageType::Drm),
            3 => Some(ImageType::PciApp),
            4 => Some(ImageType::PciCritical),
            5 => Some(ImageType::Vbn1),
            6 => Some(ImageType::Vbn2),
            _ => None,
        }
    }
}

/// Resolves identity fields against the configured sources.
///
/// The lifecycle flag (and, with the `instance-lock` feature, the lock
/// reference count) is explicit state owned by the instance, so tests and
/// embedders can run independent resolvers side by side. The library is
/// single-threaded by contract: callers serialize access themselves.
pub struct Resolver {
    ctx: SourceContext,
    initialized: bool,
    #[cfg(feature = "instance-lock")]
    lock: InstanceLock,
}

impl Resolver {
    /// Builds a resolver over the production probes.
    pub fn new(sources: SourcesConfig) -> Self {
        Self::with_context(SourceContext::new(sources))
    }

    /// Builds a resolver over a caller-assembled context (used by tests to
    /// substitute fake probes and fixture files).
    pub fn with_context(ctx: SourceContext) -> Self {
        #[cfg(feature = "instance-lock")]
        let lock = InstanceLock::new(ctx.sources.lock_file.clone());
        Resolver {
            ctx,
            initialized: false,
            #[cfg(feature = "instance-lock")]
            lock,
        }
    }

    /// Transitions to the initialized state. A second call without an
    /// intervening [`term`](Resolver::term) fails, as does losing the
    /// single-instance lock race to another process.
    pub fn init(&mut self) -> HalResult<()> {
        if self.initialized {
            warn!("init called while already initialized");
            return Err(HalError::AlreadyInitialized);
        }

        #[cfg(feature = "instance-lock")]
        if let Err(err) = self.lock.acquire() {
            warn!(error = %err, "instance lock acquisition failed");
            return Err(HalError::AlreadyInitialized);
        }

        self.initialized = true;
        debug!("resolver initialized");
        Ok(())
    }

    /// Transitions back to the uninitialized state.
    pub fn term(&mut self) -> HalResult<()> {
        if !self.initialized {
            warn!("term called while not initialized");
            return Err(HalError::NotInitialized);
        }

        #[cfg(feature = "instance-lock")]
        if let Err(err) = self.lock.release() {
            warn!(error = %err, "instance lock release failed");
            return Err(HalError::NotInitialized);
        }

        self.initialized = false;
        debug!("resolver terminated");
        Ok(())
    }

    /// Whether the resolver is currently initialized.
    pub fn is_initialized(&self) -> bool {
        #[cfg(feature = "instance-lock")]
        {
            self.initialized && self.lock.is_held()
        }
        #[cfg(not(feature = "instance-lock"))]
        {
            self.initialized
        }
    }

    fn ensure_initialized(&self) -> HalResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(HalError::NotInitialized)
        }
    }

    /// Resolves one identity field.
    ///
    /// Every field funnels through the same skeleton: lifecycle check,
    /// table lookup, buffer reservation, strategy fetch, outcome mapping.
    /// Unsupported fields are rejected before any buffer is reserved or
    /// I/O performed; strategy failures release the buffer and collapse to
    /// [`HalError::SourceRead`], with the detail in the trace.
    pub fn resolve(&self, field: FieldId) -> HalResult<ResolvedValue> {
        self.ensure_initialized()?;

        let Some(strategy) = StrategyTable::global().get(field) else {
            debug!(%field, "no backing data source");
            return Err(HalError::Unsupported {
                field: field.name().to_string(),
            });
        };

        let mut buf = String::new();
        buf.try_reserve_exact(MAX_VALUE_LEN)
            .map_err(|_| HalError::AllocationFailed)?;

        match strategy.fetch(&self.ctx, &mut buf) {
            Ok(()) => {
                let value = ResolvedValue::new(buf);
                debug!(%field, value = %value, len = value.len(), "field resolved");
                Ok(value)
            }
            Err(err) => {
                debug!(%field, error = %err, "source read failed");
                Err(HalError::SourceRead { field })
            }
        }
    }

    /// Resolves a field given its raw wire value, range-checking it first.
    /// Out-of-range values are rejected with no allocation and no I/O;
    /// panel-range values (with the `panel-types` feature) are recognized
    /// but unsupported on this platform.
    pub fn resolve_raw(&self, raw: u32) -> HalResult<ResolvedValue> {
        self.ensure_initialized()?;

        if !FieldId::is_valid_raw(raw) {
            return Err(HalError::InvalidParameter(format!(
                "serialized type {raw} out of range"
            )));
        }

        match FieldId::from_raw(raw) {
            Some(field) => self.resolve(field),
            None => Err(HalError::Unsupported {
                field: format!("panel type {raw:#x}"),
            }),
        }
    }

    // Boundary stubs. Each exists as contract: lifecycle and argument
    // validation, then a defined "not supported" outcome.

    /// Writes an identity field. There is no write path on this platform.
    pub fn set_field(&self, _field: FieldId, _value: &str) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Deletes the provisioning data image.
    pub fn delete_provisioning_data(&self) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Scrubs all storage banks.
    pub fn scrub_storage(&self) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Programs the bootloader boot pattern.
    pub fn set_bootloader_pattern(&self, _pattern: BootPattern) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Installs a bootloader splash screen image.
    pub fn set_splash_screen(&self, path: &Path) -> HalResult<()> {
        self.ensure_initialized()?;
        if path.as_os_str().is_empty() {
            return Err(HalError::InvalidParameter("empty splash path".to_string()));
        }
        Err(HalError::OperationNotSupported)
    }

    /// Removes the bootloader splash screen image.
    pub fn clear_splash_screen(&self) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Reads the secure time.
    pub fn secure_time(&self) -> HalResult<u32> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Sets the secure time.
    pub fn set_secure_time(&self, _seconds: u32) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Reads the factory-reset flag.
    pub fn factory_reset_flag(&self) -> HalResult<u16> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Sets the factory-reset flag.
    pub fn set_factory_reset_flag(&self, _flag: u16) -> HalResult<()> {
        self.ensure_initialized()?;
        Err(HalError::OperationNotSupported)
    }

    /// Writes a firmware image to flash.
    pub fn write_firmware_image(
        &self,
        name: &str,
        path: &Path,
        _image_type: ImageType,
    ) -> HalResult<()> {
        self.ensure_initialized()?;
        if name.is_empty() || path.as_os_str().is_empty() {
            return Err(HalError::InvalidParameter(
                "empty image name or path".to_string(),
            ));
        }
        Err(HalError::OperationNotSupported)
    }
}
