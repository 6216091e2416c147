use std::{fs, path::Path};

use tracing::trace;

use crate::core::{error::SourceError, types, types::SourceResult};

/// Looks a key up in a `/proc/cpuinfo`-style file (`Key   : value` lines).
///
/// The first line containing the key is split on its first `:` and the run
/// of leading spaces after the colon is skipped. The same deliberate
/// substring-match imprecision as the properties reader applies.
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

    let line = content.lines().find(|l| l.contains(key)).ok_or_else(not_found)?;
    let (_, value) = line.split_once(':').ok_or_else(not_found)?;

    let mut value = value.trim_start_matches(' ').to_string();
    types::clamp_value(&mut value);
    trace!(key, value = %value, path = %path.display(), "cpuinfo lookup");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const CPUINFO: &str = "\
processor       : 0\n\
model name      : ARMv7 Processor rev 3 (v7l)\n\
Hardware        : BCM2711\n\
Revision        : d03114\n\
Serial          : 000000001234abcd\n";

    fn fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create fixture");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn leading_spaces_after_colon_are_trimmed() {
        let file = fixture(CPUINFO);
        assert_eq!(value_for_key(file.path(), "Serial").unwrap(), "000000001234abcd");
    }

    #[test]
    fn reads_revision_and_hardware() {
        let file = fixture(CPUINFO);
        assert_eq!(value_for_key(file.path(), "Revision").unwrap(), "d03114");
        assert_eq!(value_for_key(file.path(), "Hardware").unwrap(), "BCM2711");
    }

    #[test]
    fn substring_match_can_hit_an_earlier_line() {
        // "model name" contains "name"; a later "name" key never gets a look.
        let file = fixture(CPUINFO);
        assert_eq!(
            value_for_key(file.path(), "name").unwrap(),
            "ARMv7 Processor rev 3 (v7l)"
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let file = fixture(CPUINFO);
        let err = value_for_key(file.path(), "Bogus").unwrap_err();
        assert!(matches!(err, SourceError::KeyNotFound { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = value_for_key(Path::new("/nonexistent/cpuinfo"), "Serial").unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
    }

    #[test]
    fn empty_key_rejected() {
        let file = fixture(CPUINFO);
        let err = value_for_key(file.path(), "").unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
    }

    #[test]
    fn idempotent_for_unchanged_file() {
        let file = fixture(CPUINFO);
        let first = value_for_key(file.path(), "Serial").unwrap();
        let second = value_for_key(file.path(), "Serial").unwrap();
        assert_eq!(first, second);
    }
}
