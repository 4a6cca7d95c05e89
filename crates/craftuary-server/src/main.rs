use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use craftuary_db::AppState;
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod api;
mod auth;
mod catalog;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection. A failed connect is not fatal: the public catalog
    // keeps serving the sample set while the store is unreachable.
    let db_config = craftuary_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = match craftuary_db::connect(&db_config).await {
        Ok(db) => {
            tracing::info!("running database migrations...");
            match craftuary_migration::Migrator::up(&db, None).await {
                Ok(()) => tracing::info!("migrations complete"),
                Err(e) => tracing::error!("failed to run migrations: {e}"),
            }
            db
        }
        Err(e) => {
            tracing::error!("failed to connect to database: {e}");
            tracing::warn!("continuing without a store; public catalog serves the sample set");
            sea_orm::DatabaseConnection::Disconnected
        }
    };

    // Admin credentials for the session login
    let admin_username =
        std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "changeme123".to_string());

    // SECURITY: warn if the admin password is the default fallback
    if admin_password == "changeme123" {
        tracing::error!(
            "ADMIN_PASSWORD is set to a known default value! \
             Set ADMIN_PASSWORD to a strong secret in production."
        );
        if std::env::var("CRAFTUARY_ENV").unwrap_or_default() == "production" {
            panic!("Refusing to start: ADMIN_PASSWORD must be set to a secure value in production.");
        }
    }

    let state = Arc::new(AppState {
        db,
        admin_username,
        admin_password,
    });

    // Rate limiter for the login endpoint: 10 requests per 60 seconds per IP
    let auth_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(6)
            .burst_size(10)
            .finish()
            .expect("failed to build rate limiter config"),
    );

    // Admin session routes (public, rate-limited)
    let auth_routes = Router::new()
        .route("/login", post(auth::routes::login))
        .route("/logout", post(auth::routes::logout))
        .layer(GovernorLayer::new(auth_governor_conf));

    // Public catalog + tracking routes
    let public_api = Router::new()
        .route("/themes", get(api::themes::list_themes))
        .route(
            "/themes/track",
            post(api::track::track_action).get(api::track::theme_stats),
        );

    // Admin catalog routes (session cookie required)
    let admin_api = Router::new()
        .route(
            "/themes",
            get(api::admin_themes::list_themes)
                .post(api::admin_themes::create_theme)
                .put(api::admin_themes::update_theme)
                .delete(api::admin_themes::delete_theme),
        )
        .layer(axum_middleware::from_fn(
            auth::middleware::require_admin_session,
        ));

    let api_routes = Router::new()
        .merge(public_api)
        .nest("/admin/auth", auth_routes)
        .nest("/admin", admin_api);

    // CORS configuration — restrict to configured origins
    let cors = {
        let allowed_origins_str = std::env::var("CORS_ORIGINS").unwrap_or_default();
        let methods = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ];
        if allowed_origins_str.is_empty() {
            tracing::warn!(
                "CORS_ORIGINS not set — defaulting to restrictive CORS. \
                 Set CORS_ORIGINS=http://localhost:5173 for dev."
            );
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                    "https://craftuary.com",
                )))
                .allow_methods(methods)
                .allow_headers(tower_http::cors::Any)
        } else {
            let origins: Vec<HeaderValue> = allowed_origins_str
                .split(',')
                .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                .collect();
            tracing::info!("CORS allowed origins: {:?}", origins);
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(methods)
                .allow_headers(tower_http::cors::Any)
        }
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!(%addr, "server started");

    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
