//! Bundle persistence
//!
//! The bundle is written as pretty JSON next to a `.sha256` file holding the
//! hex digest of the exact bytes. Loading rejects a missing or mismatched
//! checksum and an unknown format version.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::bundle::{StoredBundle, BUNDLE_FORMAT_VERSION};

pub const BUNDLE_FILE_NAME: &str = "blueguard_models.json";
pub const CHECKSUM_FILE_NAME: &str = "blueguard_models.json.sha256";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no saved models in {0}")]
    NotFound(PathBuf),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("unsupported bundle format v{found} (expected v{expected})")]
    UnsupportedFormat { found: u32, expected: u32 },
}

pub fn bundle_path(dir: &Path) -> PathBuf {
    dir.join(BUNDLE_FILE_NAME)
}

pub fn checksum_path(dir: &Path) -> PathBuf {
    dir.join(CHECKSUM_FILE_NAME)
}

pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Save bundle and checksum; the directory is created if needed
pub fn save_bundle(bundle: &StoredBundle, dir: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(dir)?;

    let json = serde_json::to_vec_pretty(bundle)?;
    fs::write(bundle_path(dir), &json)?;
    fs::write(checksum_path(dir), checksum(&json))?;

    tracing::info!("Models saved to {}", dir.display());
    Ok(())
}

/// Load bundle from disk with validation
pub fn load_bundle(dir: &Path) -> Result<StoredBundle, StorageError> {
    let path = bundle_path(dir);
    if !path.exists() {
        return Err(StorageError::NotFound(dir.to_path_buf()));
    }

    let data = fs::read(&path)?;
    let expected = fs::read_to_string(checksum_path(dir))?.trim().to_string();
    let actual = checksum(&data);
    if expected != actual {
        return Err(StorageError::ChecksumMismatch { expected, actual });
    }

    let bundle: StoredBundle = serde_json::from_slice(&data)?;
    if bundle.format_version != BUNDLE_FORMAT_VERSION {
        return Err(StorageError::UnsupportedFormat {
            found: bundle.format_version,
            expected: BUNDLE_FORMAT_VERSION,
        });
    }

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let bundle = StoredBundle::new(100, 3);

        save_bundle(&bundle, dir.path()).unwrap();
        let loaded = load_bundle(dir.path()).unwrap();

        assert_eq!(loaded, bundle);
    }

    #[test]
    fn test_missing_bundle() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_bundle(dir.path()), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_tampered_bundle_is_rejected() {
        let dir = TempDir::new().unwrap();
        save_bundle(&StoredBundle::new(100, 3), dir.path()).unwrap();

        let path = bundle_path(dir.path());
        let tampered = fs::read_to_string(&path).unwrap().replace("\"seed\": 3", "\"seed\": 4");
        fs::write(&path, tampered).unwrap();

        assert!(matches!(
            load_bundle(dir.path()),
            Err(StorageError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_future_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut bundle = StoredBundle::new(100, 3);
        bundle.format_version = BUNDLE_FORMAT_VERSION + 1;
        save_bundle(&bundle, dir.path()).unwrap();

        assert!(matches!(
            load_bundle(dir.path()),
            Err(StorageError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_checksum_is_hex_sha256() {
        assert_eq!(
            checksum(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        save_bundle(&StoredBundle::new(100, 3), &nested).unwrap();
        assert!(bundle_path(&nested).exists());
        assert!(checksum_path(&nested).exists());
    }
}
