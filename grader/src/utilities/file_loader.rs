//!
//! File Loader Utility
//!
//! Loads and validates JSON documents read from disk (currently the problem bank).
//! Files must exist, be regular files and stay under [`MAX_JSON_SIZE`].
//!
//! # Error Handling
//!
//! Returns [`GraderError::IoError`] for missing, unreadable or oversized files and
//! [`GraderError::InvalidJson`] when the content does not deserialize. The specific path is
//! logged; the returned error stays short so it can be shown to callers.

use crate::error::GraderError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::error;

/// Maximum allowed size for JSON files.
pub const MAX_JSON_SIZE: u64 = 2 * 1024 * 1024; // 2MB

/// Checks that a file exists, is a file, and (optionally) does not exceed a maximum size.
///
/// # Errors
///
/// Returns [`GraderError::IoError`] if the file is missing, not a file, unreadable, or too large.
fn check_file(path: &Path, max_size: Option<u64>) -> Result<(), GraderError> {
    if !path.exists() {
        error!("File not found: {}", path.display());
        return Err(GraderError::IoError("File not found".to_string()));
    }

    if !path.is_file() {
        error!("Not a file: {}", path.display());
        return Err(GraderError::IoError("Invalid file type".to_string()));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        error!("File unreadable: {} - {}", path.display(), e);
        GraderError::IoError("File unreadable".to_string())
    })?;

    if let Some(max) = max_size {
        if metadata.len() > max {
            error!(
                "File too large: {} ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                max
            );
            return Err(GraderError::IoError("File too large".to_string()));
        }
    }

    Ok(())
}

/// Reads `path` and deserializes it as JSON into `T`.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, GraderError> {
    check_file(path, Some(MAX_JSON_SIZE))?;

    let contents = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        GraderError::IoError("File unreadable".to_string())
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| GraderError::InvalidJson(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn loads_valid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("values.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let values: Vec<u32> = load_json_file(&path).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_json_file::<Vec<u32>>(Path::new("/no/such/file.json")).unwrap_err();
        assert_eq!(err, GraderError::IoError("File not found".to_string()));
    }

    #[test]
    fn directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = load_json_file::<Vec<u32>>(tmp.path()).unwrap_err();
        assert_eq!(err, GraderError::IoError("Invalid file type".to_string()));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.json");
        let mut file = fs::File::create(&path).unwrap();
        let chunk = vec![b' '; 1024 * 1024];
        for _ in 0..3 {
            file.write_all(&chunk).unwrap();
        }
        let err = load_json_file::<Vec<u32>>(&path).unwrap_err();
        assert_eq!(err, GraderError::IoError("File too large".to_string()));
    }

    #[test]
    fn malformed_json_is_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_json_file::<Vec<u32>>(&path).unwrap_err();
        assert!(matches!(err, GraderError::InvalidJson(_)));
    }
}
