//! Result verifier: checks an `AssessmentResult` against the invariants the
//! service promises its clients before it is returned or saved.
//!
//! Rules, all evaluated on every call:
//!
//! - `confidence-range`: confidence within [0, 100]
//! - `probability-range`: every probability within [0, 100]
//! - `ranking-order`: possible conditions sorted by descending probability
//! - `match-count`: 1 ≤ matched ≤ total for every condition
//! - `emergency-alert`: an alert is flagged, urgent, and names its triggers
//! - `recommendation-categories`: no category appears twice

use std::collections::HashSet;

use tracing::warn;

use medimate_contracts::{
    assessment::AssessmentResult,
    condition::Urgency,
    verify::{VerificationFailure, VerificationReport},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ResultVerifier;

impl ResultVerifier {
    pub fn new() -> Self {
        Self
    }

    pub fn verify(&self, result: &AssessmentResult) -> VerificationReport {
        let mut failures = Vec::new();

        if result.confidence > 100 {
            failures.push(VerificationFailure::new(
                "confidence-range",
                format!("confidence {} is above 100", result.confidence),
            ));
        }

        for entry in &result.possible_conditions {
            if entry.probability > 100 {
                failures.push(VerificationFailure::new(
                    "probability-range",
                    format!("'{}' has probability {}", entry.condition, entry.probability),
                ));
            }
            if entry.matched_symptoms == 0 || entry.matched_symptoms > entry.total_symptoms {
                failures.push(VerificationFailure::new(
                    "match-count",
                    format!(
                        "'{}' matched {} of {} symptoms",
                        entry.condition, entry.matched_symptoms, entry.total_symptoms
                    ),
                ));
            }
        }

        if let Some(pair) = result
            .possible_conditions
            .windows(2)
            .find(|w| w[0].probability < w[1].probability)
        {
            failures.push(VerificationFailure::new(
                "ranking-order",
                format!(
                    "'{}' ({}) ranked above '{}' ({})",
                    pair[0].condition, pair[0].probability, pair[1].condition, pair[1].probability
                ),
            ));
        }

        if let Some(alert) = &result.emergency_alert {
            if !alert.is_emergency || alert.urgency != Urgency::Immediate {
                failures.push(VerificationFailure::new(
                    "emergency-alert",
                    format!("alert must be an immediate emergency, got urgency {}", alert.urgency),
                ));
            }
            if alert.triggers.is_empty() {
                failures.push(VerificationFailure::new("emergency-alert", "alert names no triggering symptom"));
            }
        }

        let mut seen = HashSet::new();
        for rec in &result.recommendations {
            if !seen.insert(rec.category()) {
                failures.push(VerificationFailure::new(
                    "recommendation-categories",
                    format!("duplicate advice block '{}'", rec.category().unwrap_or("general")),
                ));
            }
        }

        let report = VerificationReport::from_failures(failures);
        if !report.passed {
            warn!(failures = report.failures.len(), summary = %report.summary(), "result failed verification");
        }
        report
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
