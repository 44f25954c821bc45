//! Download store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by an [`AssetSource`](crate::traits::AssetSource).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Downloads manifest '{path}' could not be read: {message}")]
    ManifestUnreadable { path: PathBuf, message: String },

    #[error("Downloads manifest '{path}' is corrupt: {message}")]
    ManifestCorrupt { path: PathBuf, message: String },

    #[error("Asset '{asset_id}' is not in the downloads manifest")]
    AssetNotFound { asset_id: String },

    #[error("Asset '{asset_id}' has no playable local copy")]
    NotPlayable { asset_id: String },

    #[error("Failed to remove media file '{path}': {message}")]
    MediaRemovalFailed { path: PathBuf, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Manifest read failures are usually a downloader mid-write.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::ManifestUnreadable { .. } | StoreError::ManifestCorrupt { .. }
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            StoreError::ManifestUnreadable { .. } => {
                "Your downloads could not be loaded right now.".to_string()
            }
            StoreError::ManifestCorrupt { .. } => {
                "The downloads list looks damaged. It may be in the middle of an update."
                    .to_string()
            }
            StoreError::AssetNotFound { .. } => {
                "This download no longer exists.".to_string()
            }
            StoreError::NotPlayable { .. } => {
                "This download is not ready to play yet.".to_string()
            }
            StoreError::MediaRemovalFailed { path, .. } => {
                format!("Could not remove '{}'.", path.display())
            }
            StoreError::Serialization { .. } => {
                "The downloads list could not be saved.".to_string()
            }
            StoreError::Io(err) => format!("Storage error: {}", err),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::ManifestUnreadable { .. } => "E_STORE_UNREADABLE",
            StoreError::ManifestCorrupt { .. } => "E_STORE_CORRUPT",
            StoreError::AssetNotFound { .. } => "E_STORE_NOT_FOUND",
            StoreError::NotPlayable { .. } => "E_STORE_NOT_PLAYABLE",
            StoreError::MediaRemovalFailed { .. } => "E_STORE_MEDIA_REMOVE",
            StoreError::Serialization { .. } => "E_STORE_SERDE",
            StoreError::Io(_) => "E_STORE_IO",
        }
    }
}
