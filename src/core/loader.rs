//! Catalog record loading utilities
//!
//! This module provides generic utilities for loading records from the
//! filesystem, reducing boilerplate in command implementations.

use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Load all records of type T from a directory
///
/// Scans the directory for .yaml files and deserializes them.
/// Files that fail to parse are silently skipped; incomplete catalog
/// data is expected and must never abort a command.
pub fn load_all<T: DeserializeOwned + 'static>(dir: &Path) -> Result<Vec<T>> {
    let mut records = Vec::new();

    if !dir.exists() {
        return Ok(records);
    }

    for entry in fs::read_dir(dir).into_diagnostic()? {
        let entry = entry.into_diagnostic()?;
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "yaml") {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(record) = serde_yml::from_str::<T>(&content) {
                    records.push(record);
                }
            }
        }
    }

    Ok(records)
}

/// Find a record file by ID (supports partial matching)
///
/// Searches for a file whose stem contains the given ID.
/// Returns the first match found.
pub fn find_record_file(dir: &Path, id: &str) -> Option<PathBuf> {
    if !dir.exists() {
        return None;
    }

    for entry in fs::read_dir(dir).ok()? {
        let entry = entry.ok()?;
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "yaml") {
            let filename = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if filename.contains(id) || filename.starts_with(id) {
                return Some(path);
            }
        }
    }

    None
}

/// Load a single record by ID
///
/// Searches for a record file matching the ID and deserializes it.
/// Returns the path and record if found.
pub fn load_record<T: DeserializeOwned + 'static>(dir: &Path, id: &str) -> Result<Option<(PathBuf, T)>> {
    if let Some(path) = find_record_file(dir, id) {
        let content = fs::read_to_string(&path).into_diagnostic()?;
        let record: T = serde_yml::from_str(&content).into_diagnostic()?;
        return Ok(Some((path, record)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_all_empty_dir() {
        let dir = tempdir().unwrap();
        let result: Result<Vec<serde_json::Value>> = load_all(dir.path());
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_load_all_nonexistent_dir() {
        let result: Result<Vec<serde_json::Value>> = load_all(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_load_all_skips_unparsable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.yaml"), "key: value").unwrap();
        fs::write(dir.path().join("bad.yaml"), ": : :").unwrap();

        let result: Vec<serde_json::Value> = load_all(dir.path()).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_find_record_file_nonexistent() {
        let result = find_record_file(Path::new("/nonexistent/path"), "PART-123");
        assert!(result.is_none());
    }

    #[test]
    fn test_find_record_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("PART-01J123456789ABCDEF.yaml");
        fs::write(&file_path, "id: PART-01J123456789ABCDEF").unwrap();

        let result = find_record_file(dir.path(), "PART-01J123456789ABCDEF");
        assert!(result.is_some());
        assert_eq!(result.unwrap(), file_path);
    }
}
