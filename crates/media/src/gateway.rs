//! The gateway trait and its wire types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::MediaError;

/// Raw image bytes received from a multipart request, ready for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A successfully hosted image: the stable retrieval URL plus the host-side
/// identifier used for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

/// External image host: takes raw bytes, returns a stable retrieval URL,
/// and supports deletion by reference.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Upload one image, returning its hosted location.
    async fn upload(&self, file: UploadFile) -> Result<StoredImage, MediaError>;

    /// Delete a hosted image by its public id. Idempotent on the host side.
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Derive the host-side public id (`{folder}/{filename-stem}`) from a stored
/// retrieval URL.
///
/// The host nests uploads one folder deep, so the id is the last two path
/// segments with the file extension stripped. Returns `None` for URLs that
/// do not have that shape.
pub fn public_id_for_url(url: &str) -> Option<String> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let filename = segments.next()?;
    let folder = segments.next()?;
    if folder.is_empty() || folder.contains(':') {
        return None;
    }
    let stem = filename.split('.').next().unwrap_or(filename);
    if stem.is_empty() {
        return None;
    }
    Some(format!("{folder}/{stem}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_id_strips_extension_and_keeps_folder() {
        assert_eq!(
            public_id_for_url("https://media.example.com/haven/a1b2c3.jpg"),
            Some("haven/a1b2c3".to_string())
        );
    }

    #[test]
    fn public_id_handles_multi_dot_filenames() {
        assert_eq!(
            public_id_for_url("https://media.example.com/haven/photo.front.png"),
            Some("haven/photo".to_string())
        );
    }

    #[test]
    fn public_id_rejects_urls_without_a_folder() {
        assert_eq!(public_id_for_url("https://media.example.com"), None);
        assert_eq!(public_id_for_url(""), None);
    }
}
