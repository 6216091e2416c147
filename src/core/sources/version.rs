use std::{fs, path::Path};

use tracing::trace;

use crate::core::{error::SourceError, types, types::SourceResult};

/// Looks a key up in a version-manifest file (`key:value` lines with a
/// configurable separator).
///
/// Unlike the properties and cpuinfo readers this one anchors to the start
/// of the line: a line matches only when it begins with the key immediately
/// followed by the separator. Leading spaces after the separator are
/// skipped.
pub fn value_for_key(path: &Path, key: &str, separator: char) -> SourceResult<String> {
    if key.is_empty() {
        return Err(SourceError::InvalidInput("empty key".to_string()));
    }
    if !separator.is_ascii() || separator.is_ascii_control() {
        return Err(SourceError::InvalidInput(format!(
            "non-printable separator {separator:?}"
        )));
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

    for line in content.lines() {
        let Some(rest) = line.strip_prefix(key) else {
            continue;
        };
        let Some(value) = rest.strip_prefix(separator) else {
            continue;
        };
        let mut value = value.trim_start_matches(' ').to_string();
        types::clamp_value(&mut value);
        trace!(key, value = %value, path = %path.display(), "version manifest lookup");
        return Ok(value);
    }

    Err(SourceError::KeyNotFound {
        key: key.to_string(),
        path: path.display().to_string(),
    })
}
