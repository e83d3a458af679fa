//! Handlers for the `/admin` resource (login, logout, dashboard).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use haven_core::error::CoreError;
use haven_core::types::Timestamp;
use haven_db::models::listing::ListingStats;
use haven_db::models::session::CreateAdminSession;
use haven_db::repositories::{ListingRepo, SessionRepo};

use crate::auth::session::{
    clear_session_cookie, generate_session_token, hash_session_token, session_cookie,
    token_from_headers, SESSION_TTL_HOURS,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response. The session token itself travels only in the
/// `Set-Cookie` header.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub expires_at: Timestamp,
}

/// POST /admin/login
///
/// Verify credentials via the injected verifier and issue a server-side
/// session with a fixed 24-hour lifetime.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let identity = state
        .credentials
        .verify(&input.username, &input.password)
        .map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::hours(SESSION_TTL_HOURS);

    SessionRepo::create(
        &state.pool,
        &CreateAdminSession {
            username: identity.username.clone(),
            token_hash,
            expires_at,
        },
    )
    .await?;

    tracing::info!(username = %identity.username, "Admin logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&token))],
        Json(SessionResponse {
            username: identity.username,
            expires_at,
        }),
    ))
}

/// POST /admin/logout
///
/// Revoke the presented session and clear the cookie. Returns 204 even when
/// no session accompanied the request.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    if let Some(token) = token_from_headers(&headers) {
        let revoked =
            SessionRepo::revoke_by_token_hash(&state.pool, &hash_session_token(&token)).await?;
        if revoked {
            tracing::info!("Admin session revoked");
        }
    }

    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie())],
    ))
}

/// GET /admin/dashboard
///
/// Aggregate listing counters for the back-office landing view.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<ListingStats>> {
    let stats = ListingRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}
