//! Scoring engine: turns a request into a verdict.
//!
//! The policy is fixed and evaluated in this order:
//! 1. `dri = 50 + min(20, 8 × links)`, minus 25 with no valid link, minus 8
//!    for predictions, minus 10 for `POLITICS_HIGH_IMPACT`; clamped to 0..=100
//! 2. No valid link and the caller asked for it → INSUFFICIENT_EVIDENCE,
//!    dri capped at 38, tier forced to Bronze
//! 3. Else dri ≥ 70 → MORE_RELIABLE, ≥ 45 → MIXED_SIGNALS,
//!    otherwise NOT_RECOMMENDED_YET
//!
//! Scoring never fails. Malformed input has already been defaulted by
//! [`EvaluationRequest::from_json`].

use tracing::debug;

use crate::narrative::{self, ReasonContext};
use crate::types::{
    Confidence, EvaluationRequest, EvaluationResponse, EvidenceLevel, Freshness, Goal, Score,
    Signals, Tier, Verdict, VerdictCode,
};

/// Version tag written into every response.
pub const SCHEMA_VERSION: &str = "aegis.opentrust.evaluation.v1";

/// Category flag that costs points.
pub const POLITICS_HIGH_IMPACT: &str = "POLITICS_HIGH_IMPACT";

const BASE_DRI: i32 = 50;
const POINTS_PER_LINK: i32 = 8;
const MAX_LINK_BONUS: i32 = 20;
const NO_SOURCE_PENALTY: i32 = 25;
const PREDICT_PENALTY: i32 = 8;
const POLITICS_PENALTY: i32 = 10;
const INSUFFICIENT_EVIDENCE_CAP: i32 = 38;

/// The scoring engine. Stateless; one instance can serve any number of requests.
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score a request and assemble the full response.
    pub fn score(&self, request: &EvaluationRequest) -> EvaluationResponse {
        let link_count = request.valid_link_count();
        let politics_high_impact = request.policy_gate.has_flag(POLITICS_HIGH_IMPACT);
        let prefs = &request.output_preferences;

        let mut dri = self.raw_dri(link_count, request.goal, politics_high_impact);
        let mut tier = tier_for(dri);

        let code = if link_count < 1 && prefs.require_insufficient_evidence_when_missing_sources {
            dri = dri.min(INSUFFICIENT_EVIDENCE_CAP);
            tier = Tier::Bronze;
            VerdictCode::InsufficientEvidence
        } else if dri >= 70 {
            VerdictCode::MoreReliable
        } else if dri >= 45 {
            VerdictCode::MixedSignals
        } else {
            VerdictCode::NotRecommendedYet
        };

        let confidence = match code {
            VerdictCode::InsufficientEvidence => Confidence::Low,
            _ if dri >= 75 => Confidence::Medium,
            _ => Confidence::Low,
        };

        debug!(
            link_count,
            dri,
            verdict = %code,
            tier = ?tier,
            "Scored evaluation request"
        );

        let ctx = ReasonContext {
            link_count,
            submitted_links: request.evidence.len(),
            politics_high_impact,
            goal: request.goal,
        };

        let mut reasons = narrative::reasons(code, &ctx);
        reasons.truncate(prefs.max_reasons);

        let mut next_checks = narrative::next_checks(link_count);
        next_checks.truncate(prefs.max_next_checks);

        EvaluationResponse {
            schema_version: SCHEMA_VERSION.to_string(),
            request_id: request.request_id.clone(),
            as_of_date: request.as_of_date.clone(),
            subject: request.subject.clone(),
            verdict: Verdict {
                code,
                summary: narrative::summary(code, prefs.language),
                confidence,
            },
            score: Score {
                // Clamped to 0..=100 above, so the cast is lossless.
                dri: dri as u8,
                tier,
            },
            signals: Signals {
                evidence_level: evidence_level_for(link_count),
                freshness: Freshness::NotAssessed,
                policy_flags: request.policy_gate.auto_flags.clone(),
            },
            reasons,
            next_checks,
            disclaimer: narrative::DISCLAIMER.to_string(),
        }
    }

    /// Base score plus adjustments, clamped to 0..=100.
    fn raw_dri(&self, link_count: usize, goal: Goal, politics_high_impact: bool) -> i32 {
        let links = i32::try_from(link_count).unwrap_or(i32::MAX);
        let mut dri = BASE_DRI + links.saturating_mul(POINTS_PER_LINK).min(MAX_LINK_BONUS);

        if link_count < 1 {
            dri -= NO_SOURCE_PENALTY;
        }
        if goal == Goal::Predict {
            dri -= PREDICT_PENALTY;
        }
        if politics_high_impact {
            dri -= POLITICS_PENALTY;
        }

        dri.clamp(0, 100)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Tier for a score: ≥ 80 Gold, ≥ 60 Silver, otherwise Bronze.
pub fn tier_for(dri: i32) -> Tier {
    if dri >= 80 {
        Tier::Gold
    } else if dri >= 60 {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}

/// Evidence level for a count of valid links.
pub fn evidence_level_for(link_count: usize) -> EvidenceLevel {
    match link_count {
        0 => EvidenceLevel::Missing,
        1 | 2 => EvidenceLevel::Weak,
        _ => EvidenceLevel::Medium,
    }
}
