//! Local filesystem object storage for editor images.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use folio_core::ports::{ObjectStorage, UploadError, UploadFile};

/// Writes uploads under `root` and serves them from `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `path` inside the root, refusing anything that would escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf, UploadError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if path.is_empty() || escapes {
            return Err(UploadError::Rejected(format!("invalid path '{path}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, path: &str, file: UploadFile) -> Result<String, UploadError> {
        if file.bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| UploadError::Io(e.to_string()))?;
        }
        tokio::fs::write(&target, &file.bytes)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;

        tracing::info!(
            path = %path,
            bytes = file.bytes.len(),
            content_type = file.content_type.as_deref().unwrap_or("unknown"),
            "Image stored"
        );
        Ok(format!("{}/{}", self.public_base_url, path))
    }
}
