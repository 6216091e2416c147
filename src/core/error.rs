use thiserror::Error;

use super::fields::FieldId;

/// Internal error type shared by the text-source readers and device probes.
///
/// Uses `thiserror` for automatic `Debug`, `Display`, and `Error` derivation
/// with context-rich messages. These variants never cross the public API:
/// the resolver logs them and collapses each into the single
/// [`HalError::SourceRead`] outcome.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A backing file does not exist. Expected on platforms that lack a
    /// given source; logged, not fatal.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// A backing file exists but could not be read.
    #[error("failed to read {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was scanned to the end without a line matching the key.
    #[error("key '{key}' not found in {path}")]
    KeyNotFound { key: String, path: String },

    /// Malformed input arguments (empty key, non-printable separator,
    /// oversized interface name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A low-level device query (socket, ioctl, flock) failed.
    #[error("system call failed: {syscall}: {reason}")]
    SystemCall { syscall: String, reason: String },
}

/// The public outcome taxonomy of the resolver surface.
///
/// Every failure is local and non-fatal; the resolver never aborts the
/// process. Callers that need the underlying detail of a `SourceRead`
/// outcome find it in the diagnostic trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HalError {
    /// A resolution or mutation entry point was called before `init()`.
    #[error("library is not initialized")]
    NotInitialized,

    /// `init()` was called while already initialized, or another process
    /// instance holds the exclusive lock.
    #[error("library is already initialized")]
    AlreadyInitialized,

    /// Out-of-range field identifier or otherwise malformed argument.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The value buffer could not be reserved.
    #[error("buffer allocation failed")]
    AllocationFailed,

    /// The retrieval strategy for the field failed: file absent, key
    /// absent, or device query error. Collapsed to one outcome; the
    /// distinction only matters for the log trail.
    #[error("failed to read data source for '{field}'")]
    SourceRead { field: FieldId },

    /// The field is recognized but has no backing data source on this
    /// platform.
    #[error("'{field}' has no backing data source")]
    Unsupported { field: String },

    /// The operation exists only as a boundary contract and carries no
    /// implementation on this platform.
    #[error("operation is not supported on this platform")]
    OperationNotSupported,
}
