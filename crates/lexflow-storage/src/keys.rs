//! Shared key generation for storage backends.
//!
//! Key format: `{segment}/{epoch_millis}-{filename}`, where `filename` is the
//! final path component of the name the user supplied.

use crate::traits::{StorageError, StorageResult};

/// Generate a storage key for an attachment.
pub fn generate_storage_key(
    segment: &str,
    epoch_millis: i64,
    filename: &str,
) -> StorageResult<String> {
    let segment = segment.trim_matches('/');
    if segment.is_empty() {
        return Err(StorageError::InvalidKey("Empty key segment".to_string()));
    }

    let name = base_name(filename)?;
    let key = format!("{}/{}-{}", segment, epoch_millis, name);
    validate_key(&key)?;
    Ok(key)
}

/// Keys must not contain `..` or a leading `/`.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            storage_key
        )));
    }
    Ok(())
}

fn base_name(filename: &str) -> StorageResult<&str> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidKey(format!(
            "Invalid file name: {:?}",
            filename
        )));
    }
    Ok(name)
}
