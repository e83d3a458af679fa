//! In-memory gateway double used by handler and repository tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::gateway::{MediaGateway, StoredImage, UploadFile};
use crate::MediaError;

/// Recording [`MediaGateway`] double.
///
/// Uploads are assigned deterministic URLs under the `haven` folder so that
/// [`public_id_for_url`](crate::public_id_for_url) round-trips. Failure modes
/// can be toggled to exercise abort and best-effort paths; deletions are
/// recorded even when they are made to fail, so callers can assert how many
/// times the deletion path ran.
#[derive(Default)]
pub struct InMemoryGateway {
    uploads: Mutex<Vec<StoredImage>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads_after: Option<usize>,
    fail_deletes: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every upload after the first `n` have succeeded.
    pub fn failing_uploads_after(n: usize) -> Self {
        Self {
            fail_uploads_after: Some(n),
            ..Self::default()
        }
    }

    /// Make every deletion return an error (while still recording it).
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// All images uploaded so far, in order.
    pub fn uploaded(&self) -> Vec<StoredImage> {
        self.uploads.lock().expect("uploads lock").clone()
    }

    /// All public ids the deletion path was invoked with, in order.
    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().expect("deletes lock").clone()
    }
}

#[async_trait]
impl MediaGateway for InMemoryGateway {
    async fn upload(&self, file: UploadFile) -> Result<StoredImage, MediaError> {
        let mut uploads = self.uploads.lock().expect("uploads lock");
        if let Some(limit) = self.fail_uploads_after {
            if uploads.len() >= limit {
                return Err(MediaError::Upload {
                    status: 500,
                    message: "simulated upload failure".to_string(),
                });
            }
        }

        let stem = file
            .filename
            .split('.')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("image");
        let n = uploads.len();
        let stored = StoredImage {
            url: format!("https://media.test/haven/{stem}-{n}.jpg"),
            public_id: format!("haven/{stem}-{n}"),
        };
        uploads.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.deletes
            .lock()
            .expect("deletes lock")
            .push(public_id.to_string());

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(MediaError::Delete {
                status: 500,
                message: "simulated deletion failure".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::public_id_for_url;

    fn file(name: &str) -> UploadFile {
        UploadFile {
            filename: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8],
        }
    }

    #[tokio::test]
    async fn upload_urls_round_trip_through_public_id_derivation() {
        let gateway = InMemoryGateway::new();
        let stored = gateway.upload(file("front.jpg")).await.unwrap();
        assert_eq!(public_id_for_url(&stored.url), Some(stored.public_id));
    }

    #[tokio::test]
    async fn uploads_fail_past_the_configured_limit() {
        let gateway = InMemoryGateway::failing_uploads_after(1);
        gateway.upload(file("a.jpg")).await.unwrap();
        assert!(gateway.upload(file("b.jpg")).await.is_err());
        assert_eq!(gateway.uploaded().len(), 1);
    }

    #[tokio::test]
    async fn failed_deletes_are_still_recorded() {
        let gateway = InMemoryGateway::new();
        gateway.fail_deletes();
        assert!(gateway.delete("haven/x-0").await.is_err());
        assert_eq!(gateway.deleted(), vec!["haven/x-0".to_string()]);
    }
}
