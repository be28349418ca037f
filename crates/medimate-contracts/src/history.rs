//! Saved assessment records and their identifiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::{AssessmentInput, AssessmentResult};

/// The authenticated caller an assessment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a saved assessment, e.g. "assessment_5f0c…".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl AssessmentId {
    /// Create a new, unique assessment ID.
    pub fn new() -> Self {
        Self(format!("assessment_{}", uuid::Uuid::new_v4().simple()))
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry in a user's assessment history.
///
/// The input fields are flattened so the record reads like the analyze body
/// with `id`, `userId`, `results` and `timestamp` added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAssessment {
    pub id: AssessmentId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub results: AssessmentResult,
    pub timestamp: DateTime<Utc>,
}

/// A slice of one user's history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub assessments: Vec<SavedAssessment>,
    /// Number of assessments stored for the user, before truncation.
    pub total: usize,
}
