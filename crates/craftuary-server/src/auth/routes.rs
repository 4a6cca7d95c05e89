use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{SESSION_AUTHENTICATED, SESSION_COOKIE, SESSION_MAX_AGE_HOURS};
use craftuary_db::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn session_cookie() -> Cookie<'static> {
    let secure = std::env::var("CRAFTUARY_ENV").unwrap_or_default() == "production";
    Cookie::build((SESSION_COOKIE, SESSION_AUTHENTICATED))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::hours(SESSION_MAX_AGE_HOURS))
        .build()
}

/// POST /api/admin/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), (StatusCode, Json<Value>)> {
    if body.username == state.admin_username && body.password == state.admin_password {
        tracing::info!("admin session opened");
        return Ok((jar.add(session_cookie()), Json(json!({ "success": true }))));
    }

    tracing::warn!(username = %body.username, "rejected admin login");
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid credentials" })),
    ))
}

/// POST /api/admin/auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
        routing::post,
        Router,
    };
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    fn auth_app() -> Router {
        let state = Arc::new(AppState {
            db: DatabaseConnection::Disconnected,
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
        });
        Router::new()
            .route("/login", post(login))
            .route("/logout", post(logout))
            .with_state(state)
    }

    fn login_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let resp = auth_app()
            .oneshot(login_request(r#"{"username":"admin","password":"hunter2"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set a cookie")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("admin_session=authenticated"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Strict"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_sets_no_cookie() {
        let resp = auth_app()
            .oneshot(login_request(r#"{"username":"admin","password":"wrong"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_username_rejected() {
        let resp = auth_app()
            .oneshot(login_request(r#"{"username":"root","password":"hunter2"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let req = Request::builder()
            .method("POST")
            .uri("/logout")
            .header(header::COOKIE, "admin_session=authenticated")
            .body(Body::empty())
            .unwrap();

        let resp = auth_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .expect("logout should expire the cookie")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("admin_session="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
