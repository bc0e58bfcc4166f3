//! The last-used bindings directory, persisted between runs.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct LastDirectory {
    last_directory: PathBuf,
}

/// Read the remembered directory.
///
/// A missing or corrupt record, or a directory that no longer exists, reads
/// as `None`.
pub fn read_last_directory(path: &Path) -> Option<PathBuf> {
    let content = std::fs::read_to_string(path).ok()?;
    let record: LastDirectory = match serde_json::from_str(&content) {
        Ok(record) => record,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "ignoring corrupt last-directory record");
            return None;
        }
    };
    let dir = record.last_directory;
    if dir.as_os_str().is_empty() || !dir.is_dir() {
        return None;
    }
    Some(dir)
}

/// Overwrite the remembered directory, creating parent directories as needed.
pub fn write_last_directory(path: &Path, dir: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let record = LastDirectory {
        last_directory: dir.to_path_buf(),
    };
    std::fs::write(path, serde_json::to_string(&record)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let record = tmp.path().join("state").join("last_directory.json");
        write_last_directory(&record, tmp.path()).unwrap();
        assert_eq!(read_last_directory(&record), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_overwrites_previous_value() {
        let tmp = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let record = tmp.path().join("last_directory.json");
        write_last_directory(&record, tmp.path()).unwrap();
        write_last_directory(&record, other.path()).unwrap();
        assert_eq!(read_last_directory(&record), Some(other.path().to_path_buf()));
    }

    #[test]
    fn test_missing_record_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_last_directory(&tmp.path().join("nope.json")), None);
    }

    #[test]
    fn test_corrupt_record_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let record = tmp.path().join("last_directory.json");
        std::fs::write(&record, "{ definitely not json").unwrap();
        assert_eq!(read_last_directory(&record), None);
        std::fs::write(&record, r#"{"other": 1}"#).unwrap();
        assert_eq!(read_last_directory(&record), None);
    }

    #[test]
    fn test_vanished_directory_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let record = tmp.path().join("last_directory.json");
        write_last_directory(&record, &tmp.path().join("gone")).unwrap();
        assert_eq!(read_last_directory(&record), None);
    }
}
