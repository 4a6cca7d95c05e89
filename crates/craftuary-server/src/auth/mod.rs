pub mod middleware;
pub mod routes;

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Value the cookie holds while a session is live.
pub const SESSION_AUTHENTICATED: &str = "authenticated";

/// Session lifetime: 24 hours.
pub const SESSION_MAX_AGE_HOURS: i64 = 24;
