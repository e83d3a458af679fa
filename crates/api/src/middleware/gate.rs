//! Access gate for admin-prefixed request paths.
//!
//! The gate derives an authenticated/anonymous state per request by
//! resolving the `admin_session` cookie against the session store, then
//! applies a three-way decision: unauthenticated admin traffic is redirected
//! to the login path, an authenticated visit to the login path is redirected
//! to the admin root, and everything else passes through unmodified.
//! Cookie presence alone grants nothing; the token must match a live,
//! unexpired session row.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use haven_db::repositories::SessionRepo;

use crate::auth::session::{hash_session_token, token_from_headers};
use crate::error::AppError;
use crate::state::AppState;

/// Prefix under which all admin traffic is mounted.
pub const ADMIN_PREFIX: &str = "/admin";

/// The only admin path reachable without a session.
pub const LOGIN_PATH: &str = "/admin/login";

/// Where an already-authenticated login request is sent.
pub const ADMIN_ROOT: &str = "/admin";

/// The gate's per-request decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Forward the request unchanged.
    Pass,
    /// Unauthenticated request to a protected admin path.
    RedirectToLogin,
    /// Authenticated request to the login path.
    RedirectToAdminRoot,
}

/// Decide what to do with a request, given its path and whether a valid
/// session accompanies it.
pub fn decide(path: &str, authenticated: bool) -> GateOutcome {
    let is_admin_path = path == ADMIN_PREFIX || path.starts_with("/admin/");
    let is_login_path = path == LOGIN_PATH;

    if is_admin_path && !is_login_path && !authenticated {
        GateOutcome::RedirectToLogin
    } else if is_login_path && authenticated {
        GateOutcome::RedirectToAdminRoot
    } else {
        GateOutcome::Pass
    }
}

/// Axum middleware enforcing the gate. Applied router-wide so it sees the
/// full request path; non-admin paths fall through untouched.
pub async fn access_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authenticated = match token_from_headers(request.headers()) {
        Some(token) => {
            let hash = hash_session_token(&token);
            SessionRepo::find_valid_by_token_hash(&state.pool, &hash)
                .await?
                .is_some()
        }
        None => false,
    };

    match decide(request.uri().path(), authenticated) {
        GateOutcome::Pass => Ok(next.run(request).await),
        GateOutcome::RedirectToLogin => Ok(Redirect::temporary(LOGIN_PATH).into_response()),
        GateOutcome::RedirectToAdminRoot => Ok(Redirect::temporary(ADMIN_ROOT).into_response()),
    }
}
