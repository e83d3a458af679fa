//! Route tree assembly.

pub mod admin;
pub mod health;
pub mod listings;

use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Build the application route tree (mounted at the router root).
///
/// ```text
/// /health                 service + database health
///
/// /listings               list (GET), create (POST, multipart)
/// /listings/{id}          get + view increment (GET), update (PUT, multipart),
///                         delete (DELETE)
///
/// /admin/login            login (POST) -- the only ungated admin path
/// /admin/logout           logout (POST)
/// /admin/dashboard        aggregate listing counters (GET)
/// ```
///
/// The access gate runs as a router-wide layer over the full path, so the
/// whole `/admin` prefix is covered whether a route matches or not;
/// `/listings` is deliberately ungated.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/listings", listings::router())
        .nest("/admin", admin::router())
}

/// Fallback for paths that match no route.
///
/// Registered explicitly so the middleware stack (access gate included)
/// wraps unrouted paths too: an anonymous request to any `/admin/...` path
/// must redirect before a 404 can be produced.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "code": "NOT_FOUND",
        })),
    )
}
