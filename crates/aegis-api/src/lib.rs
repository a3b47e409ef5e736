//! # aegis-api
//!
//! HTTP front for the AEGIS OpenTRUST scoring engine.
//!
//! - `GET /` reports that the service is up
//! - `POST /evaluate` scores a case, after the policy gate, rate limit and
//!   body size checks
//!
//! The router is built by [`router`] so it can be served by `main` or driven
//! in-process by tests.

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;

pub use config::{ApiConfig, ConfigError, RateLimitConfig};
pub use error::{ApiError, ErrorBody};
pub use rate_limit::RateLimiter;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
pub struct AppState {
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(rate_limit: &RateLimitConfig) -> Self {
        Self {
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }
}

/// Build the service router from a validated config.
pub fn router(config: ApiConfig) -> Result<Router, ConfigError> {
    config.validate()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.origin_headers()?))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let state = Arc::new(AppState::new(&config.rate_limit));

    let app = Router::new()
        .route("/", get(routes::index))
        .route(
            "/evaluate",
            post(routes::evaluate).layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit::enforce,
            )),
        )
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
