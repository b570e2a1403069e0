//! Typed helpers over localStorage.
//!
//! View preferences and the persisted log tail survive reloads through
//! these. Reads are best-effort: a missing key and a corrupt value both
//! come back as `None`.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::dom;

/// Storage operation errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// localStorage not available.
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Failed to serialize data to JSON.
    #[error("Failed to serialize value")]
    SerializationFailed,
    /// Failed to write to storage.
    #[error("Failed to write to storage")]
    WriteFailed,
}

/// Read and deserialize a value from localStorage.
pub fn get<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = dom::local_storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

/// Serialize and store a value in localStorage.
pub fn set<T: Serialize>(key: &str, data: &T) -> Result<(), StorageError> {
    let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
    let json = serde_json::to_string(data).map_err(|_| StorageError::SerializationFailed)?;
    storage
        .set_item(key, &json)
        .map_err(|_| StorageError::WriteFailed)
}

/// Remove a key from localStorage, if present.
pub fn remove(key: &str) {
    if let Some(storage) = dom::local_storage() {
        let _ = storage.remove_item(key);
    }
}
