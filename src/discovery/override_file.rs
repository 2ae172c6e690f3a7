use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::error::ErrorshotsError;

/// Split override file content into entries, one per non-empty line.
pub fn parse_entries(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the override file at `path`.
///
/// Returns `Ok(None)` when the file does not exist, in which case the default
/// cache-log location applies.
pub fn read_override_entries(path: &Path) -> Result<Option<Vec<String>>, ErrorshotsError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let entries = parse_entries(&content);
            debug!("Loaded {} entries from {}", entries.len(), path.display());
            Ok(Some(entries))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ErrorshotsError::OverrideFile {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
