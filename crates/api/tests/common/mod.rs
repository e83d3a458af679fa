//! Shared harness for handler-level tests.
//!
//! Builds the production router (same middleware stack as the binary) over a
//! test database pool, an in-memory media gateway, and a known admin
//! credential pair.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::util::ServiceExt;

use haven_api::auth::credentials::{hash_password, EnvCredentials};
use haven_api::config::ServerConfig;
use haven_api::router::build_app_router;
use haven_api::state::AppState;
use haven_media::{InMemoryGateway, MediaGateway};

/// Username the test credential verifier accepts.
pub const TEST_USERNAME: &str = "admin";

/// Password the test credential verifier accepts.
pub const TEST_PASSWORD: &str = "test-password";

/// Multipart boundary used by [`multipart_request`].
const BOUNDARY: &str = "haven-test-boundary";

/// Build the application router plus a handle to the media gateway double.
pub fn test_app(pool: PgPool) -> (Router, Arc<InMemoryGateway>) {
    test_app_with_gateway(pool, Arc::new(InMemoryGateway::new()))
}

/// Like [`test_app`], but with a caller-configured gateway double.
pub fn test_app_with_gateway(pool: PgPool, gateway: Arc<InMemoryGateway>) -> (Router, Arc<InMemoryGateway>) {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    };

    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: gateway.clone() as Arc<dyn MediaGateway>,
        credentials: Arc::new(EnvCredentials::new(TEST_USERNAME, password_hash)),
    };

    (build_app_router(state, &config), gateway)
}

/// Dispatch one request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should be routed")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Build a multipart request for the listings surface.
///
/// `fields` are plain text parts; `files` are `(filename, bytes)` pairs sent
/// as repeated `images` parts.
pub fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (filename, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"images\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build")
}

/// The standard valid field set for create/update requests.
pub fn listing_fields<'a>(title: &'a str, price: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", title),
        ("location", "Riverside"),
        ("category", "house"),
        ("transaction", "buy"),
        ("price", price),
        ("area", "120"),
        ("bedrooms", "3"),
        ("bathrooms", "2"),
        ("description", "Bright family home close to the park."),
        ("features", "garden"),
        ("features", "garage"),
        ("agent_name", "Dana Reyes"),
        ("agent_phone", "+1-555-0134"),
        ("agent_email", "dana@example.com"),
    ]
}

/// Build a simple JSON request.
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Build a bodyless request, optionally carrying a session cookie.
pub fn plain_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request should build")
}

/// Log in through the router and return the session cookie pair
/// (`admin_session=<token>`).
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/admin/login",
            serde_json::json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(response.status(), 200, "login should succeed");

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .expect("cookie should be ASCII");

    set_cookie
        .split(';')
        .next()
        .expect("cookie should have a name=value pair")
        .to_string()
}
