use std::fmt;

use serde::Serialize;

use super::types;

/// An owned, resolved field value.
///
/// Ownership transfers to the caller on success and the backing buffer is
/// released when the value is dropped, replacing the paired
/// allocate/release call convention such boundaries traditionally carry.
///
/// The reported [`len`](ResolvedValue::len) always equals the byte length
/// of the value; values never exceed `MAX_VALUE_LEN - 1` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedValue {
    buf: String,
}

impl ResolvedValue {
    /// Takes ownership of a strategy-filled buffer, enforcing the capacity
    /// cap one final time.
    pub(crate) fn new(mut buf: String) -> Self {
        types::clamp_value(&mut buf);
        ResolvedValue { buf }
    }

    /// The value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// The value as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Byte length of the value.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when the backing source produced an empty value.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the value, handing the buffer to the caller.
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl AsRef<str> for ResolvedValue {
    fn as_ref(&self) -> &str {
        &self.buf
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MAX_VALUE_LEN;

    #[test]
    fn length_matches_value() {
        let value = ResolvedValue::new("Acme Corp".to_string());
        assert_eq!(value.as_str(), "Acme Corp");
        assert_eq!(value.len(), 9);
        assert!(!value.is_empty());
    }

    #[test]
    fn oversized_buffers_are_clamped() {
        let value = ResolvedValue::new("m".repeat(MAX_VALUE_LEN * 2));
        assert_eq!(value.len(), MAX_VALUE_LEN - 1);
    }

    #[test]
    fn serializes_as_plain_string() {
        let value = ResolvedValue::new("Widget9000".to_string());
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"Widget9000\"");
    }

    #[test]
    fn into_string_releases_the_buffer() {
        let value = ResolvedValue::new("E45F01".to_string());
        assert_eq!(value.into_string(), "E45F01");
    }
}
