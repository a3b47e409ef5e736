//! Errors returned to HTTP clients.

use aegis_core::PolicyGateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `POLICY_GATE_NOT_ACKNOWLEDGED`
    pub error: String,

    /// Human-readable explanation
    pub message: String,
}

/// Errors the evaluation service reports to clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    PolicyGate(#[from] PolicyGateError),

    #[error("Rate limit exceeded: at most {max_requests} requests per {window}. Try again later.")]
    RateLimited { max_requests: u32, window: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PolicyGate(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::PolicyGate(e) => e.code(),
            ApiError::RateLimited { .. } => "RATE_LIMITED",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::Acknowledgment;

    #[test]
    fn test_policy_gate_maps_to_400() {
        let err = ApiError::from(PolicyGateError {
            missing: vec![Acknowledgment::Limits],
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.body();
        assert_eq!(body.error, "POLICY_GATE_NOT_ACKNOWLEDGED");
        assert!(body.message.contains("acknowledged_limits"));
    }

    #[test]
    fn test_rate_limited_maps_to_429() {
        let err = ApiError::RateLimited {
            max_requests: 20,
            window: "1m".to_string(),
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body().error, "RATE_LIMITED");
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded: at most 20 requests per 1m. Try again later."
        );
    }
}
