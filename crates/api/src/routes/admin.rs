//! Route definitions for the admin back office.
//!
//! The access gate is not mounted here: it is a router-wide layer (see
//! [`crate::router::build_app_router`]) because a layer on this nested
//! router would only see prefix-stripped paths. Every route below is
//! therefore only reachable through the gate.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /login        -> login (the only admin path the gate leaves open)
/// POST /logout       -> logout
/// GET  /dashboard    -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
}
