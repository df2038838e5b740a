//! Local filesystem adapter for stored media files.
//!
//! Files are addressed by a logical path relative to the media root
//! (e.g. `outputs/image_<hex>.png`). The adapter also resolves the public
//! URL for a logical path; actually serving those URLs is the reverse
//! proxy's job.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Stores and retrieves media files under a single root directory.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    public_base: String,
}

impl MediaStorage {
    /// Create an adapter rooted at `root`, with `public_base` as the URL
    /// prefix clients use to reach stored files (e.g. `/media`).
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        let mut public_base = public_base.into();
        while public_base.ends_with('/') {
            public_base.pop();
        }
        Self {
            root: root.into(),
            public_base,
        }
    }

    /// Write `bytes` at the logical path, creating parent directories as
    /// needed. Returns the logical path back. Callers use generated unique
    /// filenames, so an existing file is never silently replaced in practice.
    pub async fn save(&self, rel: &str, bytes: &[u8]) -> Result<String, CoreError> {
        let path = self.absolute(rel);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create directory", parent, e))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| storage_error("write file", &path, e))?;
        Ok(rel.to_string())
    }

    /// Whether a file exists at the logical path.
    pub async fn exists(&self, rel: &str) -> bool {
        tokio::fs::try_exists(self.absolute(rel)).await.unwrap_or(false)
    }

    /// Remove the file at the logical path.
    pub async fn delete(&self, rel: &str) -> Result<(), CoreError> {
        let path = self.absolute(rel);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| storage_error("remove file", &path, e))
    }

    /// Public URL for a logical path.
    pub fn url_for(&self, rel: &str) -> String {
        format!("{}/{}", self.public_base, rel.trim_start_matches('/'))
    }

    /// Filesystem location for a logical path, for reading files back.
    pub fn absolute(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> CoreError {
    CoreError::Internal(format!("Failed to {action} {}: {err}", path.display()))
}
