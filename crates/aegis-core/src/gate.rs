//! Policy gate: acknowledgments required before any evaluation runs.
//!
//! The gate is checked before scoring and looks at nothing but the three
//! acknowledgment booleans, so a request that fails it fails the same way
//! whatever evidence it carries.

use serde::Serialize;
use thiserror::Error;

use crate::types::PolicyGate;

/// One of the acknowledgments a caller must give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Acknowledgment {
    #[serde(rename = "acknowledged_limits")]
    Limits,
    #[serde(rename = "acknowledged_no_professional_advice")]
    NoProfessionalAdvice,
    #[serde(rename = "acknowledged_no_harassment")]
    NoHarassment,
}

impl Acknowledgment {
    /// All acknowledgments, in the order they are reported.
    pub const ALL: [Acknowledgment; 3] = [
        Acknowledgment::Limits,
        Acknowledgment::NoProfessionalAdvice,
        Acknowledgment::NoHarassment,
    ];

    /// The request field carrying this acknowledgment.
    pub fn field_name(&self) -> &'static str {
        match self {
            Acknowledgment::Limits => "acknowledged_limits",
            Acknowledgment::NoProfessionalAdvice => "acknowledged_no_professional_advice",
            Acknowledgment::NoHarassment => "acknowledged_no_harassment",
        }
    }

    fn is_given(&self, gate: &PolicyGate) -> bool {
        match self {
            Acknowledgment::Limits => gate.acknowledged_limits,
            Acknowledgment::NoProfessionalAdvice => gate.acknowledged_no_professional_advice,
            Acknowledgment::NoHarassment => gate.acknowledged_no_harassment,
        }
    }
}

/// The policy gate was not fully acknowledged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Policy gate not acknowledged. Missing: {}", field_list(.missing))]
pub struct PolicyGateError {
    /// Acknowledgments that were absent or not `true`, in [`Acknowledgment::ALL`] order
    pub missing: Vec<Acknowledgment>,
}

impl PolicyGateError {
    /// Machine-readable error code sent to clients.
    pub const CODE: &'static str = "POLICY_GATE_NOT_ACKNOWLEDGED";

    pub fn code(&self) -> &'static str {
        Self::CODE
    }
}

fn field_list(missing: &[Acknowledgment]) -> String {
    missing
        .iter()
        .map(Acknowledgment::field_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that all three acknowledgments were given.
pub fn check_policy_gate(gate: &PolicyGate) -> Result<(), PolicyGateError> {
    let missing: Vec<Acknowledgment> = Acknowledgment::ALL
        .into_iter()
        .filter(|ack| !ack.is_given(gate))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PolicyGateError { missing })
    }
}
