//! devident — device identity resolution shim for RDK-V reference boards
//!
//! This crate answers "what device is this?" on Raspberry Pi based RDK-V
//! boxes. It resolves manufacturer, model, serial, version, and network
//! address fields from the platform's text files (`/etc/device.properties`,
//! `/proc/cpuinfo`, `/version.txt`) and hardware probes (interface MAC
//! ioctls, the Bluetooth controller), behind an explicit init/term
//! lifecycle. Resolution is synchronous and read-only; the mutation side of
//! the management contract is exposed as validated stubs that report
//! unsupported.
//!
//! ## Modules
//!
//! * `config` — Configuration structures, loading, validation, and defaults.
//!   Supports TOML configuration files with validation via the `validator`
//!   crate.
//!
//! * `core` — Field identifiers, the per-field strategy table, source
//!   readers and probes, and the resolver that ties them together.
//!
//! * `logger` — Centralized logging initialization using `tracing`.
//!   Supports console output in multiple formats (compact, pretty, JSON)
//!   and optional systemd journald integration.
//!
//! ## Features
//!
//! * `instance-lock` — Enforces single-instance operation through an
//!   exclusive lock file during init.
//!
//! * `panel-types` — Accepts the extended panel serialization range as
//!   valid (but unsupported) raw field values.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::{
    FieldId, HalError, HalResult, ResolvedValue, Resolver, WifiCredentials, WifiError,
    MAX_VALUE_LEN,
};
