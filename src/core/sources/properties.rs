use std::{fs, path::Path};

use tracing::trace;

use crate::core::{error::SourceError, types, types::SourceResult};

/// Looks a key up in a `KEY=VALUE` properties file.
///
/// The first line *containing* the key wins and is split on its first `=`;
/// the value runs to end of line and is not trimmed. The substring match
/// can pick an unrelated line whose text merely embeds the key; management
/// stacks above this shim depend on that behavior, so it is preserved
/// deliberately.
pub fn value_for_key(path: &Path, key: &str) -> SourceResult<String> {
    if key.is_empty() {
        return Err(SourceError::InvalidInput("empty key".to_string()));
    }

    if !path.exists() {
        return Err(SourceError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| SourceError::FileRead {
        path: path.display().to_string(),
        source,
    })?;

    let not_found = || SourceError::KeyNotFound {
        key: key.to_string(),
        path: path.display().to_string(),
    };

    // Only the first matching line is considered, even if it has no '='.
    let line = content.lines().find(|l| l.contains(key)).ok_or_else(not_found)?;
    let (_, value) = line.split_once('=').ok_or_else(not_found)?;

    let mut value = value.to_string();
    types::clamp_value(&mut value);
    trace!(key, value = %value, path = %path.display(), "properties lookup");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create fixture");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn extracts_value_after_equals() {
        let file = fixture("MANUFACTURE=Acme Corp\nDEVICE_NAME=Widget9000\n");
        assert_eq!(value_for_key(file.path(), "MANUFACTURE").unwrap(), "Acme Corp");
        assert_eq!(value_for_key(file.path(), "DEVICE_NAME").unwrap(), "Widget9000");
    }

    #[test]
    fn missing_key_is_an_error() {
        let file = fixture("MANUFACTURE=Acme Corp\n");
        let err = value_for_key(file.path(), "MOCA_INTERFACE").unwrap_err();
        assert!(matches!(err, SourceError::KeyNotFound { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = value_for_key(Path::new("/nonexistent/device.properties"), "MANUFACTURE")
            .unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
    }

    #[test]
    fn empty_key_rejected_without_touching_the_file() {
        let err = value_for_key(Path::new("/nonexistent/device.properties"), "").unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
    }

    #[test]
    fn substring_match_picks_the_first_containing_line() {
        // "NAME" is a substring of the first line's key; that line wins.
        let file = fixture("DEVICE_NAME=Widget9000\nNAME=other\n");
        assert_eq!(value_for_key(file.path(), "NAME").unwrap(), "Widget9000");
    }

    #[test]
    fn first_matching_line_without_equals_fails() {
        let file = fixture("MANUFACTURE Acme\nMANUFACTURE=Acme Corp\n");
        let err = value_for_key(file.path(), "MANUFACTURE").unwrap_err();
        assert!(matches!(err, SourceError::KeyNotFound { .. }));
    }

    #[test]
    fn value_is_not_trimmed() {
        let file = fixture("MANUFACTURE= Acme Corp \n");
        assert_eq!(value_for_key(file.path(), "MANUFACTURE").unwrap(), " Acme Corp ");
    }

    #[test]
    fn crlf_lines_do_not_leak_carriage_returns() {
        let file = fixture("MANUFACTURE=Acme Corp\r\n");
        assert_eq!(value_for_key(file.path(), "MANUFACTURE").unwrap(), "Acme Corp");
    }

    #[test]
    fn empty_value_resolves_to_empty_string() {
        let file = fixture("MANUFACTURE=\n");
        assert_eq!(value_for_key(file.path(), "MANUFACTURE").unwrap(), "");
    }

    #[test]
    fn long_values_are_capped() {
        let file = fixture(&format!("KEY={}\n", "v".repeat(600)));
        let value = value_for_key(file.path(), "KEY").unwrap();
        assert_eq!(value.len(), crate::core::types::MAX_VALUE_LEN - 1);
    }
}
