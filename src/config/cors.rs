use axum::http::{header, HeaderName, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

// Local portal dev servers (Vite and the legacy CRA port).
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

const PREFLIGHT_MAX_AGE_SECS: u64 = 3600;

pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-user-id"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn allowed_origins() -> AllowOrigin {
    let configured =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in configured.split(',').map(str::trim) {
        if origin.is_empty() {
            continue;
        }
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(e) => tracing::warn!("CORS: skipping invalid origin '{}': {}", origin, e),
        }
    }

    if origins.is_empty() {
        tracing::warn!("CORS: no valid origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: {} allowed origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}
