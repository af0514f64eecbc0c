//! Object storage port for images embedded in post content.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A file picked in the editor.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `file` under `path` and return a durable URL for it.
    async fn upload(&self, path: &str, file: UploadFile) -> Result<String, UploadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Empty upload")]
    Empty,

    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Storage rejected the upload: {0}")]
    Rejected(String),
}

/// Storage path for an editor image: `blog-images/{unix_millis}-{name}`.
pub fn upload_path(file_name: &str, now: DateTime<Utc>) -> String {
    let name: String = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let name = if name.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        name
    };

    format!("blog-images/{}-{}", now.timestamp_millis(), name)
}
