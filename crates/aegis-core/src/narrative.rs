//! Human-readable text attached to a verdict.
//!
//! Everything here is a pure function of the verdict and a few request
//! facts. Summaries are localized; reasons and next checks are English.

use crate::types::{Goal, Language, VerdictCode};

/// Disclaimer attached to every response.
pub const DISCLAIMER: &str = "AEGIS OpenTRUST produces a heuristic reliability signal from the \
sources you provide. It is not a fact-check, not legal, medical or financial advice, and must \
not be used to target or harass any person.";

/// Facts about the request that shape the reason wording.
#[derive(Debug, Clone, Copy)]
pub struct ReasonContext {
    pub link_count: usize,
    /// Links in the request before URL validation.
    pub submitted_links: usize,
    pub politics_high_impact: bool,
    pub goal: Goal,
}

/// One-line summary of the verdict in the requested language.
pub fn summary(code: VerdictCode, language: Language) -> String {
    let text = match (language, code) {
        (Language::En, VerdictCode::MoreReliable) => {
            "The submitted sources point to a comparatively reliable claim."
        }
        (Language::En, VerdictCode::MixedSignals) => {
            "The submitted sources give mixed signals; treat the claim with caution."
        }
        (Language::En, VerdictCode::NotRecommendedYet) => {
            "There is not enough support yet to rely on this claim."
        }
        (Language::En, VerdictCode::InsufficientEvidence) => {
            "No usable sources were provided, so no reliability judgement can be made."
        }
        (Language::Es, VerdictCode::MoreReliable) => {
            "Las fuentes aportadas apuntan a una afirmación comparativamente fiable."
        }
        (Language::Es, VerdictCode::MixedSignals) => {
            "Las fuentes aportadas dan señales mixtas; trate la afirmación con cautela."
        }
        (Language::Es, VerdictCode::NotRecommendedYet) => {
            "Todavía no hay respaldo suficiente para confiar en esta afirmación."
        }
        (Language::Es, VerdictCode::InsufficientEvidence) => {
            "No se aportaron fuentes utilizables, por lo que no es posible emitir un juicio de fiabilidad."
        }
    };
    text.to_string()
}

/// The three reasons behind a verdict, before truncation.
pub fn reasons(code: VerdictCode, ctx: &ReasonContext) -> Vec<String> {
    if code == VerdictCode::InsufficientEvidence {
        return insufficient_evidence_reasons(ctx);
    }

    let sources = match ctx.link_count {
        0 => "No valid source links were provided, which lowers the score.".to_string(),
        1 => "Only 1 valid source link was provided.".to_string(),
        n if n < 3 => format!("Only {} valid source links were provided.", n),
        n => format!("{} valid source links were provided.", n),
    };

    let category = if ctx.politics_high_impact {
        "The topic is flagged as high-impact politics, which lowers the score."
    } else {
        "No high-impact category flags were raised."
    };

    let goal = match ctx.goal {
        Goal::Predict => "Predictions are inherently uncertain, which lowers the score.",
        Goal::Verify => "The case asks to verify an existing claim.",
    };

    vec![sources, category.to_string(), goal.to_string()]
}

fn insufficient_evidence_reasons(ctx: &ReasonContext) -> Vec<String> {
    let sources = match ctx.submitted_links {
        0 => "No valid source links were provided.".to_string(),
        1 => "The 1 submitted source link is not a valid URL.".to_string(),
        n => format!("None of the {} submitted source links is a valid URL.", n),
    };

    let category = if ctx.politics_high_impact {
        "High-impact political topics need sources before any judgement is given."
    } else {
        "A reliability judgement needs at least one verifiable source."
    };

    let goal = match ctx.goal {
        Goal::Predict => "A prediction cannot be assessed without supporting sources.",
        Goal::Verify => "A claim cannot be verified without supporting sources.",
    };

    vec![sources, category.to_string(), goal.to_string()]
}

/// Follow-up checks for the user, before truncation.
pub fn next_checks(link_count: usize) -> Vec<String> {
    let mut checks = Vec::with_capacity(2);
    if link_count < 3 {
        checks.push("Add more independent sources (at least 3 are recommended).".to_string());
    }
    checks.push("Cross-check the key claims against a primary or official source.".to_string());
    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(link_count: usize, politics_high_impact: bool, goal: Goal) -> ReasonContext {
        ReasonContext {
            link_count,
            submitted_links: link_count,
            politics_high_impact,
            goal,
        }
    }

    #[test]
    fn test_reasons_always_three() {
        for code in [
            VerdictCode::MoreReliable,
            VerdictCode::MixedSignals,
            VerdictCode::NotRecommendedYet,
            VerdictCode::InsufficientEvidence,
        ] {
            assert_eq!(reasons(code, &ctx(0, false, Goal::Verify)).len(), 3);
            assert_eq!(reasons(code, &ctx(5, true, Goal::Predict)).len(), 3);
        }
    }

    #[test]
    fn test_reasons_follow_request_facts() {
        let r = reasons(VerdictCode::MixedSignals, &ctx(2, true, Goal::Predict));
        assert_eq!(r[0], "Only 2 valid source links were provided.");
        assert!(r[1].contains("high-impact politics"));
        assert!(r[2].starts_with("Predictions"));

        let r = reasons(VerdictCode::MoreReliable, &ctx(4, false, Goal::Verify));
        assert_eq!(r[0], "4 valid source links were provided.");
        assert_eq!(r[1], "No high-impact category flags were raised.");
    }

    #[test]
    fn test_insufficient_evidence_wording_differs() {
        let scored = reasons(VerdictCode::NotRecommendedYet, &ctx(0, false, Goal::Verify));
        let insufficient = reasons(VerdictCode::InsufficientEvidence, &ctx(0, false, Goal::Verify));
        assert_ne!(scored, insufficient);
        assert_eq!(insufficient[0], "No valid source links were provided.");
    }

    #[test]
    fn test_insufficient_evidence_names_rejected_links() {
        let mut context = ctx(0, false, Goal::Verify);
        context.submitted_links = 1;
        let r = reasons(VerdictCode::InsufficientEvidence, &context);
        assert_eq!(r[0], "The 1 submitted source link is not a valid URL.");

        context.submitted_links = 4;
        let r = reasons(VerdictCode::InsufficientEvidence, &context);
        assert_eq!(r[0], "None of the 4 submitted source links is a valid URL.");
    }

    #[test]
    fn test_next_checks() {
        assert_eq!(next_checks(0).len(), 2);
        assert_eq!(next_checks(2).len(), 2);
        let checks = next_checks(3);
        assert_eq!(checks.len(), 1);
        assert!(checks[0].starts_with("Cross-check"));
    }

    #[test]
    fn test_summary_localized() {
        let en = summary(VerdictCode::MixedSignals, Language::En);
        let es = summary(VerdictCode::MixedSignals, Language::Es);
        assert_ne!(en, es);
        assert!(es.contains("señales mixtas"));
    }
}
