/// Error taxonomies: the boundary-level outcome codes and the internal
/// source-level failure detail they collapse from.
pub mod error;

/// The device-identity field identifiers and their wire-order mapping.
pub mod fields;

/// Single-instance lock file enforcement.
///
/// Available when the `instance-lock` feature is enabled.
#[cfg(feature = "instance-lock")]
pub mod lock;

/// The resolver: lifecycle state, the uniform resolution loop, and the
/// stub boundary operations.
pub mod resolver;

/// Read-only identity sources: text-file readers and hardware probes.
pub mod sources;

/// The per-field retrieval strategy table.
pub mod strategy;

/// Shared result aliases and value-size limits.
pub mod types;

/// The owned, size-capped resolved value type.
pub mod value;

/// WiFi-credential boundary surface.
pub mod wifi;

pub use error::{HalError, SourceError};
pub use fields::FieldId;
pub use resolver::{BootPattern, ImageType, Resolver};
pub use sources::SourceContext;
pub use strategy::StrategyTable;
pub use types::{HalResult, SourceResult, MAX_VALUE_LEN};
pub use value::ResolvedValue;
pub use wifi::{WifiCredentials, WifiError};
