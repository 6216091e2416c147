use super::error::{HalError, SourceError};

/// Result type returned by the public resolver surface.
///
/// Every operation that can fail reports one of the well-defined outcomes
/// in [`HalError`]; callers only ever see that taxonomy.
pub type HalResult<T> = std::result::Result<T, HalError>;

/// Result type used internally by the text-source readers and device probes.
///
/// Source errors carry the detail needed for the diagnostic trail (path,
/// key, syscall); the resolver collapses them into [`HalError::SourceRead`]
/// before they cross the public boundary.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Fixed capacity of a resolved value buffer in bytes.
///
/// Large enough for any field value this platform produces. Values are
/// clamped to `MAX_VALUE_LEN - 1` bytes, leaving one byte of headroom for
/// a trailing NUL when a value crosses a C boundary.
pub const MAX_VALUE_LEN: usize = 255;

/// Clamps a value to the reader capacity, never splitting a UTF-8 character.
pub(crate) fn clamp_value(value: &mut String) {
    let max = MAX_VALUE_LEN - 1;
    if value.len() > max {
        let mut end = max;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_leaves_short_values_alone() {
        let mut value = "Widget9000".to_string();
        clamp_value(&mut value);
        assert_eq!(value, "Widget9000");
    }

    #[test]
    fn clamp_caps_at_capacity_minus_one() {
        let mut value = "x".repeat(MAX_VALUE_LEN + 40);
        clamp_value(&mut value);
        assert_eq!(value.len(), MAX_VALUE_LEN - 1);
    }

    #[test]
    fn clamp_respects_char_boundaries() {
        // 'é' is two bytes; an odd cap would otherwise split it.
        let mut value = "é".repeat(200);
        clamp_value(&mut value);
        assert!(value.len() <= MAX_VALUE_LEN - 1);
        assert!(value.is_char_boundary(value.len()));
    }
}
