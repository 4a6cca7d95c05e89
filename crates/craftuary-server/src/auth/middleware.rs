use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use super::{SESSION_AUTHENTICATED, SESSION_COOKIE};

/// Middleware: require a live admin session cookie
pub async fn require_admin_session(request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());

    match jar.get(SESSION_COOKIE) {
        Some(cookie) if cookie.value() == SESSION_AUTHENTICATED => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Admin session required" })),
        )
            .into_response(),
    }
}
