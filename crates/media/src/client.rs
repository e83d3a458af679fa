//! HTTP client for the image host.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::gateway::{MediaGateway, StoredImage, UploadFile};
use crate::MediaError;

/// Default folder images are uploaded under on the host.
const DEFAULT_FOLDER: &str = "haven";

/// Image host configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Base URL of the image host API, without trailing slash.
    pub base_url: String,
    /// API key sent with every upload and deletion.
    pub api_key: String,
    /// Folder all listing images are uploaded under.
    pub folder: String,
}

impl MediaConfig {
    /// Load media host configuration from environment variables.
    ///
    /// | Env Var         | Required | Default |
    /// |-----------------|----------|---------|
    /// | `MEDIA_BASE_URL`| **yes**  | --      |
    /// | `MEDIA_API_KEY` | **yes**  | --      |
    /// | `MEDIA_FOLDER`  | no       | `haven` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing; the server should fail fast
    /// on misconfiguration.
    pub fn from_env() -> Self {
        let base_url = std::env::var("MEDIA_BASE_URL")
            .expect("MEDIA_BASE_URL must be set in the environment");
        let api_key =
            std::env::var("MEDIA_API_KEY").expect("MEDIA_API_KEY must be set in the environment");
        let folder = std::env::var("MEDIA_FOLDER").unwrap_or_else(|_| DEFAULT_FOLDER.into());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            folder,
        }
    }
}

/// Upload response returned by the image host.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// reqwest-backed [`MediaGateway`] implementation against the image host's
/// HTTP API.
pub struct ImageHostClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl ImageHostClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaGateway for ImageHostClient {
    async fn upload(&self, file: UploadFile) -> Result<StoredImage, MediaError> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("folder", self.config.folder.clone())
            .text("api_key", self.config.api_key.clone());

        let response = self
            .http
            .post(format!("{}/image/upload", self.config.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Upload {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        tracing::debug!(filename = %file.filename, public_id = %body.public_id, "Image uploaded");

        Ok(StoredImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let response = self
            .http
            .post(format!("{}/image/destroy", self.config.base_url))
            .form(&[("public_id", public_id), ("api_key", &self.config.api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Delete {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(public_id, "Image deleted");
        Ok(())
    }
}
