//! HTTP client for the listing API.
//!
//! Mutations map one-to-one onto the server surface and are never retried;
//! a failure surfaces once to the caller. The admin session token issued at
//! login is persisted to a local file and attached as a cookie header on
//! admin requests.

use std::path::{Path, PathBuf};

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::redirect;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use haven_core::listing::{Listing, ListingInput};
use haven_core::types::{DbId, Timestamp};

/// Name of the cookie the server issues at login.
const SESSION_COOKIE: &str = "admin_session";

/// Default API endpoint for local development.
const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error payload.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session file error: {0}")]
    Session(#[from] std::io::Error),

    /// An admin endpoint was called without a live session.
    #[error("Not logged in (run `haven-console login` first)")]
    NotLoggedIn,
}

/// Body of a successful login response.
#[derive(Debug, Deserialize)]
pub struct SessionInfo {
    pub username: String,
    pub expires_at: Timestamp,
}

/// Body of a successful deletion response.
#[derive(Debug, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
}

/// Admin dashboard counters.
#[derive(Debug, Deserialize)]
pub struct DashboardStats {
    pub total_listings: i64,
    pub active_listings: i64,
    pub total_views: i64,
    pub total_inquiries: i64,
}

/// Client over the listing API's HTTP surface.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session_file: PathBuf,
}

impl ApiClient {
    /// Build a client from environment variables.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `HAVEN_API_URL`      | `http://localhost:3000`  |
    /// | `HAVEN_SESSION_FILE` | `$HOME/.haven-session`   |
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("HAVEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let session_file = std::env::var("HAVEN_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
                PathBuf::from(home).join(".haven-session")
            });

        // Redirects stay visible: a 307 from the access gate means the
        // session is missing or dead, not that we should follow it.
        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!(api_url = %base_url, "Console client configured");

        Ok(Self {
            base_url,
            http,
            session_file,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // -----------------------------------------------------------------------
    // Public catalog
    // -----------------------------------------------------------------------

    /// Fetch the full collection, newest first.
    pub async fn list(&self) -> Result<Vec<Listing>, ClientError> {
        let response = self.http.get(self.url("/listings")).send().await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Fetch one listing. The server counts this as a view.
    pub async fn get(&self, id: DbId) -> Result<Listing, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/listings/{id}")))
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a listing from its field set plus at least one image file.
    pub async fn create(
        &self,
        input: &ListingInput,
        images: &[PathBuf],
    ) -> Result<Listing, ClientError> {
        let form = attach_images(listing_form(input), images).await?;
        let response = self
            .http
            .post(self.url("/listings"))
            .multipart(form)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Update a listing. With `keep_existing` the prior image sequence is
    /// preserved and new uploads are appended.
    pub async fn update(
        &self,
        id: DbId,
        input: &ListingInput,
        images: &[PathBuf],
        keep_existing: bool,
    ) -> Result<Listing, ClientError> {
        let mut form = listing_form(input);
        if keep_existing {
            form = form.text("keepExistingImages", "true");
        }
        let form = attach_images(form, images).await?;

        let response = self
            .http
            .put(self.url(&format!("/listings/{id}")))
            .multipart(form)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Delete a listing, returning the server's confirmation message.
    pub async fn delete(&self, id: DbId) -> Result<DeleteOutcome, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/listings/{id}")))
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    // -----------------------------------------------------------------------
    // Admin session
    // -----------------------------------------------------------------------

    /// Log in and persist the issued session token locally.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionInfo, ClientError> {
        let response = self
            .http
            .post(self.url("/admin/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        let token = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(session_token_from_set_cookie);

        let response = expect_success(response).await?;
        let info: SessionInfo = response.json().await?;

        match token {
            Some(token) => std::fs::write(&self.session_file, token)?,
            None => {
                return Err(ClientError::Api {
                    status: 200,
                    message: "login response carried no session cookie".into(),
                })
            }
        }

        Ok(info)
    }

    /// Revoke the server-side session and remove the local token.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(cookie) = self.cookie_header() {
            let response = self
                .http
                .post(self.url("/admin/logout"))
                .header(COOKIE, cookie)
                .send()
                .await?;
            expect_success(response).await?;
        }

        if self.session_file.exists() {
            std::fs::remove_file(&self.session_file)?;
        }
        Ok(())
    }

    /// Fetch the admin dashboard counters. Requires a live session.
    pub async fn dashboard(&self) -> Result<DashboardStats, ClientError> {
        let cookie = self.cookie_header().ok_or(ClientError::NotLoggedIn)?;
        let response = self
            .http
            .get(self.url("/admin/dashboard"))
            .header(COOKIE, cookie)
            .send()
            .await?;

        // A gate redirect means the stored token no longer matches a live
        // session.
        if response.status() == StatusCode::TEMPORARY_REDIRECT {
            return Err(ClientError::NotLoggedIn);
        }
        Ok(expect_success(response).await?.json().await?)
    }

    fn cookie_header(&self) -> Option<String> {
        read_session_token(&self.session_file).map(|token| format!("{SESSION_COOKIE}={token}"))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pass successful responses through; turn error responses into
/// [`ClientError::Api`] using the server's `{error}` payload when present.
async fn expect_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body["error"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Render the scalar fields of a listing as multipart text parts.
fn listing_form(input: &ListingInput) -> Form {
    let mut form = Form::new()
        .text("title", input.title.clone())
        .text("location", input.location.clone())
        .text("category", input.category.to_string())
        .text("transaction", input.transaction.to_string())
        .text("price", input.price.to_string())
        .text("area", input.area.to_string())
        .text("bedrooms", input.bedrooms.to_string())
        .text("bathrooms", input.bathrooms.to_string())
        .text("description", input.description.clone())
        .text("agent_name", input.agent_name.clone())
        .text("agent_phone", input.agent_phone.clone())
        .text("agent_email", input.agent_email.clone());

    for feature in &input.features {
        form = form.text("features", feature.clone());
    }
    if let Some(status) = input.status {
        form = form.text("status", status.to_string());
    }
    form
}

/// Read image files from disk and attach them as repeated `images` parts.
async fn attach_images(mut form: Form, images: &[PathBuf]) -> Result<Form, ClientError> {
    for path in images {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime_for_path(path))?;
        form = form.part("images", part);
    }
    Ok(form)
}

/// Best-effort content type from the file extension.
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Extract the session token value from a `Set-Cookie` header.
fn session_token_from_set_cookie(value: &str) -> Option<String> {
    let pair = value.split(';').next()?;
    let (name, token) = pair.trim().split_once('=')?;
    if name != SESSION_COOKIE || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Read the persisted session token, if any.
fn read_session_token(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cookie_parsing_extracts_the_token() {
        assert_eq!(
            session_token_from_set_cookie(
                "admin_session=tok-123; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400"
            ),
            Some("tok-123".to_string())
        );
    }

    #[test]
    fn set_cookie_parsing_ignores_other_cookies_and_cleared_values() {
        assert_eq!(session_token_from_set_cookie("theme=dark; Path=/"), None);
        assert_eq!(
            session_token_from_set_cookie("admin_session=; Max-Age=0"),
            None
        );
    }

    #[test]
    fn mime_is_derived_from_the_extension() {
        assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("photo")), "image/jpeg");
    }
}
