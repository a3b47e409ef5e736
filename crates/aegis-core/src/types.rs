//! Request and response types for reliability evaluation.
//!
//! Requests arrive as loosely-shaped JSON. [`EvaluationRequest::from_json`]
//! never fails: absent or wrongly-typed fields fall back to their defaults so
//! the engine always has something to score.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of reasons returned when the caller does not ask otherwise.
pub const DEFAULT_MAX_REASONS: usize = 3;

/// Default number of next checks returned when the caller does not ask otherwise.
pub const DEFAULT_MAX_NEXT_CHECKS: usize = 2;

// ============================================================================
// REQUEST
// ============================================================================

/// What the caller wants to do with the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Check whether an existing claim holds up.
    #[default]
    Verify,
    /// Judge a forward-looking claim.
    Predict,
}

impl Goal {
    fn from_json(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("predict") => Goal::Predict,
            _ => Goal::Verify,
        }
    }
}

/// Language used for the verdict summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// Resolve a language tag such as `es` or `es-MX`. Unknown tags map to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("es") {
            Language::Es
        } else {
            Language::En
        }
    }
}

/// A single piece of submitted evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLink {
    /// The URL exactly as submitted. Validity is judged at scoring time.
    pub url: String,
}

impl EvidenceLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Whether the URL parses as an absolute URL. Reachability is never checked.
    pub fn is_valid(&self) -> bool {
        url::Url::parse(&self.url).is_ok()
    }
}

/// Acknowledgments and category flags that gate an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyGate {
    /// The user accepts that the verdict is heuristic and limited
    pub acknowledged_limits: bool,

    /// The user accepts that this is not professional advice
    pub acknowledged_no_professional_advice: bool,

    /// The user will not use the result to harass anyone
    pub acknowledged_no_harassment: bool,

    /// Category tags raised upstream, e.g. `POLITICS_HIGH_IMPACT`.
    /// Order of first appearance is kept; duplicates are dropped.
    pub auto_flags: Vec<String>,
}

impl PolicyGate {
    fn from_json(value: Option<&Value>) -> Self {
        let Some(gate) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        // Only a literal `true` counts as an acknowledgment.
        let acknowledged = |key: &str| matches!(gate.get(key), Some(Value::Bool(true)));

        let mut auto_flags: Vec<String> = Vec::new();
        for flag in gate
            .get("auto_flags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
        {
            if !auto_flags.iter().any(|f| f == flag) {
                auto_flags.push(flag.to_string());
            }
        }

        Self {
            acknowledged_limits: acknowledged("acknowledged_limits"),
            acknowledged_no_professional_advice: acknowledged("acknowledged_no_professional_advice"),
            acknowledged_no_harassment: acknowledged("acknowledged_no_harassment"),
            auto_flags,
        }
    }

    /// Check whether a category flag was raised.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.auto_flags.iter().any(|f| f == flag)
    }
}

/// How the caller wants the response shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPreferences {
    /// Upper bound on the reason list
    pub max_reasons: usize,

    /// Upper bound on the next-checks list
    pub max_next_checks: usize,

    /// Answer INSUFFICIENT_EVIDENCE instead of scoring when no valid source is given
    pub require_insufficient_evidence_when_missing_sources: bool,

    /// Language for the verdict summary
    pub language: Language,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            max_reasons: DEFAULT_MAX_REASONS,
            max_next_checks: DEFAULT_MAX_NEXT_CHECKS,
            require_insufficient_evidence_when_missing_sources: false,
            language: Language::En,
        }
    }
}

impl OutputPreferences {
    fn from_json(value: Option<&Value>) -> Self {
        let Some(prefs) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        Self {
            max_reasons: limit_from_json(prefs.get("max_reasons")).unwrap_or(DEFAULT_MAX_REASONS),
            max_next_checks: limit_from_json(prefs.get("max_next_checks"))
                .unwrap_or(DEFAULT_MAX_NEXT_CHECKS),
            require_insufficient_evidence_when_missing_sources: prefs
                .get("require_insufficient_evidence_when_missing_sources")
                .is_some_and(is_truthy),
            language: prefs
                .get("language")
                .and_then(Value::as_str)
                .map(Language::from_tag)
                .unwrap_or_default(),
        }
    }
}

/// A case submitted for evaluation.
///
/// `subject`, `as_of_date` and `request_id` are opaque: they are echoed back
/// untouched (as `null` when absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub subject: Value,
    pub evidence: Vec<EvidenceLink>,
    pub policy_gate: PolicyGate,
    pub goal: Goal,
    pub output_preferences: OutputPreferences,
    pub as_of_date: Value,
    pub request_id: Value,
}

impl EvaluationRequest {
    /// Build a request from arbitrary JSON, substituting defaults for
    /// anything missing or malformed.
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| value.get(key);

        let evidence = field("evidence")
            .and_then(|e| e.get("links"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|link| link.get("url").and_then(Value::as_str))
            .map(EvidenceLink::new)
            .collect();

        Self {
            subject: field("subject").cloned().unwrap_or(Value::Null),
            evidence,
            policy_gate: PolicyGate::from_json(field("policy_gate")),
            goal: Goal::from_json(field("case").and_then(|c| c.get("goal"))),
            output_preferences: OutputPreferences::from_json(field("output_preferences")),
            as_of_date: field("as_of_date").cloned().unwrap_or(Value::Null),
            request_id: field("request_id").cloned().unwrap_or(Value::Null),
        }
    }

    /// Build a request from raw body bytes. Bytes that are not JSON are
    /// treated as an empty request.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let value = serde_json::from_slice(bytes).unwrap_or(Value::Null);
        Self::from_json(&value)
    }

    /// Number of evidence links whose URL parses.
    pub fn valid_link_count(&self) -> usize {
        self.evidence.iter().filter(|link| link.is_valid()).count()
    }
}

/// JSON truthiness: `false`, `0`, `""` and `null` are falsy, everything else truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read a list limit. Non-negative numbers are accepted with any fraction
/// dropped; anything else yields `None`.
fn limit_from_json(value: Option<&Value>) -> Option<usize> {
    let value = value?;
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => Some(f.trunc() as usize),
        _ => None,
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

/// The four possible verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictCode {
    MoreReliable,
    MixedSignals,
    NotRecommendedYet,
    InsufficientEvidence,
}

impl VerdictCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictCode::MoreReliable => "MORE_RELIABLE",
            VerdictCode::MixedSignals => "MIXED_SIGNALS",
            VerdictCode::NotRecommendedYet => "NOT_RECOMMENDED_YET",
            VerdictCode::InsufficientEvidence => "INSUFFICIENT_EVIDENCE",
        }
    }
}

impl std::fmt::Display for VerdictCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
}

/// Coarse bucket derived from the DRI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
}

/// How much usable evidence was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceLevel {
    Medium,
    Weak,
    Missing,
}

/// Source freshness. Not assessed yet; always reported as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Freshness {
    #[default]
    NotAssessed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub code: VerdictCode,

    /// Localized one-line explanation of the code
    pub summary: String,

    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Reliability index, always within 0..=100
    pub dri: u8,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    pub evidence_level: EvidenceLevel,
    pub freshness: Freshness,

    /// The request's category flags, echoed
    pub policy_flags: Vec<String>,
}

/// Result of evaluating one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub schema_version: String,
    pub request_id: Value,
    pub as_of_date: Value,
    pub subject: Value,
    pub verdict: Verdict,
    pub score: Score,
    pub signals: Signals,
    pub reasons: Vec<String>,
    pub next_checks: Vec<String>,
    pub disclaimer: String,
}
