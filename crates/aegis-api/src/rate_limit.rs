//! Per-client fixed-window rate limiting.
//!
//! Each client IP gets a counter that lives for exactly one window. The
//! counter is created on the first request and expires `window` later, at
//! which point the next request starts a fresh window.

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use moka::sync::Cache;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::RateLimitConfig;
use crate::error::ApiError;
use crate::AppState;

/// Upper bound on distinct clients tracked at once.
const MAX_TRACKED_CLIENTS: u64 = 100_000;

/// Fixed-window request counter keyed by client IP.
pub struct RateLimiter {
    counters: Cache<IpAddr, Arc<AtomicU32>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let counters = Cache::builder()
            .max_capacity(MAX_TRACKED_CLIENTS)
            .time_to_live(config.window)
            .build();

        Self {
            counters,
            max_requests: config.max_requests,
            window: config.window,
        }
    }

    /// Count one request from `client`, failing once the window's quota is spent.
    pub fn check(&self, client: IpAddr) -> Result<(), ApiError> {
        let counter = self
            .counters
            .get_with(client, || Arc::new(AtomicU32::new(0)));
        let seen = counter.fetch_add(1, Ordering::SeqCst).saturating_add(1);

        if seen > self.max_requests {
            info!(client = %client, seen, max = self.max_requests, "Rate limit exceeded");
            return Err(ApiError::RateLimited {
                max_requests: self.max_requests,
                window: humantime::format_duration(self.window).to_string(),
            });
        }
        Ok(())
    }

    /// Requests counted for `client` in its current window.
    #[cfg(test)]
    pub fn current(&self, client: IpAddr) -> u32 {
        self.counters
            .get(&client)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

/// Middleware enforcing the limiter on the wrapped route.
///
/// Requests without connection info (e.g. in-process tests) share the
/// `0.0.0.0` bucket.
pub async fn enforce(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    state.rate_limiter.check(client)?;
    Ok(next.run(request).await)
}
