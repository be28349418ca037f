//! Condition catalog entries and their triage tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symptom::{SymptomCategory, SymptomId};

/// How quickly a patient with this condition should be seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Immediate,
    Urgent,
    Soon,
    Routine,
}

impl Urgency {
    /// Patient-facing advice for this tier.
    pub fn describe(&self) -> &'static str {
        match self {
            Urgency::Immediate => "Seek immediate medical attention",
            Urgency::Urgent => "See doctor within 24 hours",
            Urgency::Soon => "Schedule appointment soon",
            Urgency::Routine => "Routine follow-up",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Urgency::Immediate => "immediate",
            Urgency::Urgent => "urgent",
            Urgency::Soon => "soon",
            Urgency::Routine => "routine",
        };
        f.write_str(s)
    }
}

/// Ranking tie-breaker between conditions with equal probability and
/// equal matched-symptom counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank where higher sorts first (high > medium > low).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// A condition the analyzer can propose.
///
/// `symptoms` lists the defining symptoms; the match probability is the
/// fraction of these present in an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub category: SymptomCategory,
    pub symptoms: Vec<SymptomId>,
    pub description: String,
    pub urgency: Urgency,
    pub priority: Priority,
}
