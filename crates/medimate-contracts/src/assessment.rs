//! Assessment input and result types.
//!
//! `AssessmentInput` is what the wizard assembles and what the
//! `/api/symptom-checker/analyze` endpoint receives. `AssessmentResult` is what
//! the analyzer returns. Both use camelCase on the wire.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    condition::{Priority, Urgency},
    symptom::{SymptomCategory, SymptomId},
};

/// Shown when an assessment is submitted without any symptom selected.
pub const EMPTY_SYMPTOMS_MESSAGE: &str = "Please select at least one symptom";

/// Everything the analyzer needs for one assessment.
///
/// Severities are kept exactly as the caller supplied them; clamping into
/// [1, 5] happens inside the analyzer so that saved assessments record the
/// raw input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    /// Selected symptom identifiers. Duplicates collapse on deserialization.
    #[serde(default)]
    pub symptoms: BTreeSet<SymptomId>,
    /// Raw per-symptom severity ranks. Missing entries default to moderate.
    ///
    /// Any JSON number is accepted: fractions round to the nearest integer
    /// and values beyond `i64` saturate, so `4.0` and `1e20` still reach the
    /// analyzer's clamp.
    #[serde(default, deserialize_with = "raw_rank::deserialize_map")]
    pub severities: BTreeMap<SymptomId, i64>,
    /// Free-form duration, e.g. "3 days" or "less than 24 hours".
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
}

impl AssessmentInput {
    /// Start an input from a list of symptom identifiers.
    pub fn with_symptoms<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(|s| SymptomId(s.into())).collect(),
            ..Self::default()
        }
    }

    pub fn severity(mut self, symptom: &str, rank: i64) -> Self {
        self.severities.insert(SymptomId::new(symptom), rank);
        self
    }

    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = Some(age_group.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn chronic_condition(mut self, condition: impl Into<String>) -> Self {
        self.chronic_conditions.push(condition.into());
        self
    }
}

/// Raised by the emergency screen. Present on a result only when triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub is_emergency: bool,
    pub message: String,
    /// Always `Urgency::Immediate`.
    pub urgency: Urgency,
    pub instructions: String,
    /// The selected symptoms that tripped the screen.
    pub triggers: Vec<SymptomId>,
}

/// One entry in the ranked differential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCondition {
    /// Condition display name.
    pub condition: String,
    pub category: SymptomCategory,
    /// Match probability in [0, 100].
    pub probability: u8,
    pub description: String,
    pub urgency: Urgency,
    pub priority: Priority,
    pub matched_symptoms: usize,
    pub total_symptoms: usize,
}

/// A block of advice shown with the result.
///
/// ```json
/// {"kind": "category", "category": "respiratory", "items": ["..."]}
/// {"kind": "general", "items": ["..."]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Recommendation {
    Category { category: String, items: Vec<String> },
    General { items: Vec<String> },
}

impl Recommendation {
    /// The category name; `None` for the general block.
    pub fn category(&self) -> Option<&str> {
        match self {
            Recommendation::Category { category, .. } => Some(category),
            Recommendation::General { .. } => None,
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            Recommendation::Category { items, .. } | Recommendation::General { items } => items,
        }
    }
}

/// The output of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    /// Aggregate confidence in [0, 100].
    pub confidence: u8,
    pub emergency_alert: Option<EmergencyAlert>,
    /// Ordered by descending probability.
    pub possible_conditions: Vec<MatchedCondition>,
    pub recommendations: Vec<Recommendation>,
}

impl AssessmentResult {
    pub fn is_emergency(&self) -> bool {
        self.emergency_alert.is_some()
    }

    pub fn top_condition(&self) -> Option<&MatchedCondition> {
        self.possible_conditions.first()
    }
}

// ── Severity ranks on the wire ────────────────────────────────────────────────

mod raw_rank {
    use std::collections::BTreeMap;
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};
    use serde::Deserialize;

    use crate::symptom::SymptomId;

    /// One severity rank, from any JSON number.
    struct RawRank(i64);

    impl<'de> Deserialize<'de> for RawRank {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(RankVisitor)
        }
    }

    struct RankVisitor;

    impl<'de> Visitor<'de> for RankVisitor {
        type Value = RawRank;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a numeric severity rank")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawRank, E> {
            Ok(RawRank(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawRank, E> {
            Ok(RawRank(i64::try_from(v).unwrap_or(i64::MAX)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawRank, E> {
            if v.is_nan() {
                return Err(E::custom("severity rank is not a number"));
            }
            // `as` saturates at the i64 bounds.
            Ok(RawRank(v.round() as i64))
        }
    }

    pub(super) fn deserialize_map<'de, D>(deserializer: D) -> Result<BTreeMap<SymptomId, i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<SymptomId, RawRank>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|(id, RawRank(rank))| (id, rank)).collect())
    }
}
