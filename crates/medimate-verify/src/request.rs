//! Request-body verifier for the symptom-checker endpoints.
//!
//! Verification runs in two phases:
//!
//! 1. **Structural**: the raw JSON body is validated against the endpoint's
//!    JSON Schema document using the `jsonschema` crate.
//! 2. **Semantic**: rules the schema cannot express, currently "at least
//!    one symptom".
//!
//! All failures are collected before returning, so a client sees every
//! problem with its body in one 400 response.

use serde_json::Value;
use tracing::{debug, warn};

use medimate_contracts::{
    assessment::EMPTY_SYMPTOMS_MESSAGE,
    error::{TriageError, TriageResult},
    verify::{VerificationFailure, VerificationReport},
};

const ANALYZE_SCHEMA: &str = include_str!("../schema/analyze-request.json");
const SAVE_SCHEMA: &str = include_str!("../schema/save-assessment.json");

/// A compiled verifier for one endpoint's request body.
pub struct RequestVerifier {
    name: &'static str,
    validator: jsonschema::Validator,
}

impl RequestVerifier {
    /// Verifier for `POST /api/symptom-checker/analyze` bodies.
    pub fn analyze() -> TriageResult<Self> {
        Self::compile("analyze-request", ANALYZE_SCHEMA)
    }

    /// Verifier for `POST /api/symptom-checker/save-assessment` bodies.
    pub fn save_assessment() -> TriageResult<Self> {
        Self::compile("save-assessment", SAVE_SCHEMA)
    }

    /// Compile a schema document. A malformed document is a `ConfigError`.
    fn compile(name: &'static str, document: &str) -> TriageResult<Self> {
        let schema: Value = serde_json::from_str(document).map_err(|e| TriageError::ConfigError {
            reason: format!("schema '{name}' is not valid JSON: {e}"),
        })?;
        let validator = jsonschema::validator_for(&schema).map_err(|e| TriageError::ConfigError {
            reason: format!("invalid JSON Schema document '{name}': {e}"),
        })?;
        Ok(Self { name, validator })
    }

    /// Verify a raw request body.
    pub fn verify(&self, body: &Value) -> VerificationReport {
        let mut failures: Vec<VerificationFailure> = Vec::new();

        // ── Phase 1: JSON Schema structural validation ────────────────────────
        for error in self.validator.iter_errors(body) {
            let message = format!("JSON Schema violation at {}: {}", error.instance_path, error);
            warn!(schema = self.name, %message, "request failed structural validation");
            failures.push(VerificationFailure::new("json-schema", message));
        }

        // ── Phase 2: Semantic rules ───────────────────────────────────────────
        //
        // A missing or mistyped array is already reported by the schema.
        debug!(schema = self.name, rule_id = "symptoms-non-empty", "evaluating verification rule");
        if let Some(symptoms) = body.get("symptoms").and_then(Value::as_array) {
            if symptoms.is_empty() {
                failures.push(VerificationFailure::new("symptoms-non-empty", EMPTY_SYMPTOMS_MESSAGE));
            }
        }

        VerificationReport::from_failures(failures)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rule_ids(report: &VerificationReport) -> Vec<&str> {
        report.failures.iter().map(|f| f.rule_id.as_str()).collect()
    }

    // ── Analyze bodies ────────────────────────────────────────────────────────

    #[test]
    fn test_full_analyze_body_passes() {
        let body = json!({
            "symptoms": ["cough", "fever"],
            "severities": { "cough": 2, "fever": 3 },
            "duration": "3 days",
            "ageGroup": "adult",
            "gender": "female",
            "chronicConditions": ["asthma"]
        });
        let report = RequestVerifier::analyze().unwrap().verify(&body);
        assert!(report.passed, "unexpected failures: {}", report.summary());
    }

    #[test]
    fn test_minimal_analyze_body_passes() {
        let report = RequestVerifier::analyze().unwrap().verify(&json!({ "symptoms": ["cough"] }));
        assert!(report.passed);
    }

    #[test]
    fn test_empty_symptoms_rejected_with_wizard_message() {
        let report = RequestVerifier::analyze().unwrap().verify(&json!({ "symptoms": [] }));
        assert!(!report.passed);
        assert_eq!(rule_ids(&report), vec!["symptoms-non-empty"]);
        assert_eq!(report.failures[0].message, EMPTY_SYMPTOMS_MESSAGE);
    }

    /// Out-of-range and fractional ranks pass; the analyzer clamps them.
    #[test]
    fn test_any_numeric_severity_passes() {
        let body = json!({
            "symptoms": ["cough", "fever"],
            "severities": { "cough": 4.0, "fever": 1e20 }
        });
        let report = RequestVerifier::analyze().unwrap().verify(&body);
        assert!(report.passed, "unexpected failures: {}", report.summary());
    }

    #[test]
    fn test_missing_symptoms_is_schema_failure() {
        let report = RequestVerifier::analyze().unwrap().verify(&json!({ "duration": "3 days" }));
        assert!(!report.passed);
        assert_eq!(rule_ids(&report), vec!["json-schema"]);
    }

    /// Every problem is reported, not just the first.
    #[test]
    fn test_failures_are_collected() {
        let body = json!({
            "symptoms": ["cough"],
            "severities": { "cough": "very bad" },
            "ageGroup": 42,
            "chronicConditions": "diabetes"
        });
        let report = RequestVerifier::analyze().unwrap().verify(&body);
        assert!(!report.passed);
        assert_eq!(report.failures.len(), 3, "got: {}", report.summary());
        assert!(report.failures.iter().all(|f| f.rule_id == "json-schema"));
    }

    #[test]
    fn test_non_object_body_rejected() {
        let report = RequestVerifier::analyze().unwrap().verify(&json!(["cough"]));
        assert!(!report.passed);
    }

    // ── Save bodies ───────────────────────────────────────────────────────────

    #[test]
    fn test_save_body_requires_results() {
        let verifier = RequestVerifier::save_assessment().unwrap();

        let missing = verifier.verify(&json!({ "symptoms": ["cough"] }));
        assert!(!missing.passed);

        let complete = verifier.verify(&json!({
            "symptoms": ["cough"],
            "results": {
                "confidence": 60,
                "emergencyAlert": null,
                "possibleConditions": [],
                "recommendations": []
            }
        }));
        assert!(complete.passed, "unexpected failures: {}", complete.summary());
    }

    #[test]
    fn test_save_body_confidence_out_of_range() {
        let report = RequestVerifier::save_assessment().unwrap().verify(&json!({
            "symptoms": ["cough"],
            "results": { "confidence": 140, "possibleConditions": [], "recommendations": [] }
        }));
        assert!(!report.passed);
    }
}
