//! Media upload gateway: the external image host behind listing photos.
//!
//! The [`MediaGateway`] trait is the seam the API server programs against;
//! [`client::ImageHostClient`] is the production HTTP implementation and
//! [`memory::InMemoryGateway`] a recording double for tests.

pub mod client;
pub mod gateway;
pub mod memory;

pub use client::{ImageHostClient, MediaConfig};
pub use gateway::{public_id_for_url, MediaGateway, StoredImage, UploadFile};
pub use memory::InMemoryGateway;

/// Errors surfaced by a media gateway implementation.
///
/// An `Upload` failure aborts the whole listing mutation it belongs to;
/// `Delete` failures during record deletion are logged and swallowed by the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Upload rejected by media host ({status}): {message}")]
    Upload { status: u16, message: String },

    #[error("Deletion rejected by media host ({status}): {message}")]
    Delete { status: u16, message: String },

    #[error("Media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected media host response: {0}")]
    InvalidResponse(String),
}
