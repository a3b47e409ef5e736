//! # aegis-core
//!
//! Deterministic reliability scoring for AEGIS OpenTRUST.
//!
//! Given a case (subject, evidence links, policy acknowledgments, output
//! preferences) this crate answers:
//! - Did the caller acknowledge the usage policy?
//! - How reliable does the claim look, given the sources supplied?
//! - What should the caller check next?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **Lenient**: Malformed fields become defaults; scoring never fails
//! 3. **Gate first**: A request without all acknowledgments is never scored
//! 4. **No I/O**: Links are judged by URL syntax only, never fetched
//!
//! ## Example
//!
//! ```rust
//! use aegis_core::{evaluate, Tier, VerdictCode};
//! use serde_json::json;
//!
//! let body = json!({
//!     "evidence": { "links": [
//!         { "url": "https://a.com" },
//!         { "url": "https://b.com" },
//!         { "url": "https://c.com" }
//!     ]},
//!     "policy_gate": {
//!         "acknowledged_limits": true,
//!         "acknowledged_no_professional_advice": true,
//!         "acknowledged_no_harassment": true
//!     }
//! });
//!
//! let response = evaluate(&body).unwrap();
//! assert_eq!(response.verdict.code, VerdictCode::MoreReliable);
//! assert_eq!(response.score.dri, 70);
//! assert_eq!(response.score.tier, Tier::Silver);
//! ```

pub mod gate;
pub mod narrative;
pub mod scoring;
pub mod types;

// Re-export main types at crate root
pub use gate::{check_policy_gate, Acknowledgment, PolicyGateError};
pub use scoring::{ScoringEngine, POLITICS_HIGH_IMPACT, SCHEMA_VERSION};
pub use types::{
    Confidence, EvaluationRequest, EvaluationResponse, EvidenceLevel, EvidenceLink, Freshness,
    Goal, Language, OutputPreferences, PolicyGate, Score, Signals, Tier, Verdict, VerdictCode,
};

use serde_json::Value;

/// Evaluate a case given as raw JSON.
///
/// This is the main entry point. The request is parsed leniently, the
/// policy gate is checked, and only then is the case scored.
///
/// # Returns
///
/// * `Ok(EvaluationResponse)` - The verdict, score, signals and guidance
/// * `Err(PolicyGateError)` - One or more acknowledgments were missing
pub fn evaluate(body: &Value) -> Result<EvaluationResponse, PolicyGateError> {
    evaluate_request(&EvaluationRequest::from_json(body))
}

/// Evaluate an already-parsed request.
pub fn evaluate_request(request: &EvaluationRequest) -> Result<EvaluationResponse, PolicyGateError> {
    check_policy_gate(&request.policy_gate)?;
    Ok(ScoringEngine::new().score(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn acknowledged() -> Value {
        json!({
            "acknowledged_limits": true,
            "acknowledged_no_professional_advice": true,
            "acknowledged_no_harassment": true
        })
    }

    #[test]
    fn test_basic_evaluation() {
        let body = json!({
            "evidence": { "links": [
                { "url": "https://a.com" },
                { "url": "https://b.com" },
                { "url": "https://c.com" }
            ]},
            "policy_gate": acknowledged()
        });

        let response = evaluate(&body).unwrap();

        assert_eq!(response.score.dri, 70);
        assert_eq!(response.verdict.code, VerdictCode::MoreReliable);
        assert_eq!(response.score.tier, Tier::Silver);
        assert_eq!(response.signals.evidence_level, EvidenceLevel::Medium);
    }

    #[test]
    fn test_missing_gate_rejected() {
        let err = evaluate(&json!({})).unwrap_err();
        assert_eq!(err.missing.len(), 3);
        assert_eq!(err.code(), "POLICY_GATE_NOT_ACKNOWLEDGED");
    }

    #[test]
    fn test_gate_checked_regardless_of_evidence() {
        let body = json!({
            "evidence": { "links": [
                { "url": "https://a.com" },
                { "url": "https://b.com" },
                { "url": "https://c.com" }
            ]},
            "policy_gate": {
                "acknowledged_limits": true,
                "acknowledged_no_professional_advice": true
            }
        });
        let err = evaluate(&body).unwrap_err();
        assert_eq!(err.missing, vec![Acknowledgment::NoHarassment]);
    }

    #[test]
    fn test_insufficient_evidence_end_to_end() {
        let body = json!({
            "evidence": { "links": [{ "url": "not-a-url" }] },
            "policy_gate": acknowledged(),
            "output_preferences": {
                "require_insufficient_evidence_when_missing_sources": true,
                "max_reasons": 2,
                "language": "es"
            }
        });

        let response = evaluate(&body).unwrap();

        assert_eq!(response.verdict.code, VerdictCode::InsufficientEvidence);
        assert!(response.score.dri <= 38);
        assert_eq!(response.score.tier, Tier::Bronze);
        assert_eq!(response.reasons.len(), 2);
        assert_eq!(response.reasons[0], "The 1 submitted source link is not a valid URL.");
        assert!(response.verdict.summary.starts_with("No se aportaron"));
    }

    #[test]
    fn test_response_wire_shape() {
        let body = json!({
            "request_id": "r-1",
            "evidence": { "links": [{ "url": "https://a.com" }] },
            "policy_gate": acknowledged()
        });

        let value = serde_json::to_value(evaluate(&body).unwrap()).unwrap();

        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert_eq!(value["request_id"], "r-1");
        assert_eq!(value["as_of_date"], Value::Null);
        assert_eq!(value["verdict"]["code"], "MIXED_SIGNALS");
        assert_eq!(value["verdict"]["confidence"], "LOW");
        assert_eq!(value["score"]["dri"], 58);
        assert_eq!(value["score"]["tier"], "Bronze");
        assert_eq!(value["signals"]["evidence_level"], "WEAK");
        assert_eq!(value["signals"]["freshness"], "NOT_ASSESSED");
        assert!(value["signals"]["policy_flags"].as_array().unwrap().is_empty());
        assert_eq!(value["next_checks"].as_array().unwrap().len(), 2);
    }
}
