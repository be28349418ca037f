//! Verification report types.
//!
//! Analyze requests are checked before they reach the analyzer, and results
//! are checked before they leave the service. Both checks produce a
//! `VerificationReport`; only a passing report lets the request proceed.

use serde::{Deserialize, Serialize};

use crate::error::{TriageError, TriageResult};

/// The result of running every rule of a verifier against one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if all rules passed.
    pub passed: bool,
    /// All failures collected during this verification run. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    /// Build a report from collected failures.
    pub fn from_failures(failures: Vec<VerificationFailure>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
        }
    }

    /// One-line summary, `[rule] message; [rule] message`.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(self)` on pass, otherwise `TriageError::VerificationFailed`
    /// carrying the summary.
    pub fn into_result(self) -> TriageResult<Self> {
        if self.passed {
            Ok(self)
        } else {
            Err(TriageError::VerificationFailed { reason: self.summary() })
        }
    }
}

/// A single rule failure within a `VerificationReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Identifier of the rule that failed.
    pub rule_id: String,
    /// Human-readable explanation of why the rule failed.
    pub message: String,
}

impl VerificationFailure {
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }
}
