use std::sync::Arc;

use haven_media::MediaGateway;

use crate::auth::credentials::CredentialVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The media gateway and credential verifier ride as trait objects so tests
/// can inject doubles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: haven_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External image host used for listing photos.
    pub media: Arc<dyn MediaGateway>,
    /// Admin credential verification capability.
    pub credentials: Arc<dyn CredentialVerifier>,
}
