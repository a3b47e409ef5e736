//! API routes

use aegis_core::{EvaluationRequest, EvaluationResponse};
use axum::body::Bytes;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;

/// Name reported by the service root.
pub const SERVICE_NAME: &str = "AEGIS OpenTRUST API";

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub ok: bool,
    pub service: String,
}

pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        ok: true,
        service: SERVICE_NAME.to_string(),
    })
}

/// Evaluate a case.
///
/// The body is read as raw bytes so that a missing or wrong content type,
/// or a body that is not JSON, degrades to an empty request instead of a
/// parse error. Such a request then fails the policy gate.
pub async fn evaluate(body: Bytes) -> Result<Json<EvaluationResponse>, ApiError> {
    let request = EvaluationRequest::from_slice(&body);

    let response = aegis_core::evaluate_request(&request).inspect_err(|e| {
        warn!(request_id = %request.request_id, missing = ?e.missing, "Policy gate rejected request");
    })?;

    info!(
        request_id = %response.request_id,
        verdict = %response.verdict.code,
        dri = response.score.dri,
        "Evaluation complete"
    );

    Ok(Json(response))
}
