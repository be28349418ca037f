//! Symptom identity, category and severity types.
//!
//! Symptom identifiers are stable kebab-case strings (e.g. "severe-chest-pain")
//! shared by the catalog, the wizard and the wire format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a symptom in the catalog.
///
/// Example: SymptomId("difficulty-breathing")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub String);

impl SymptomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymptomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymptomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The body system a symptom or condition belongs to.
///
/// The wizard's first step asks the patient to pick one of these, and the
/// analyzer selects advice blocks by the category of each matched condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymptomCategory {
    Respiratory,
    Gastrointestinal,
    Neurological,
    Cardiovascular,
    Musculoskeletal,
    General,
}

impl SymptomCategory {
    /// Every category, in wizard display order.
    pub const ALL: [SymptomCategory; 6] = [
        SymptomCategory::Respiratory,
        SymptomCategory::Gastrointestinal,
        SymptomCategory::Neurological,
        SymptomCategory::Cardiovascular,
        SymptomCategory::Musculoskeletal,
        SymptomCategory::General,
    ];

    /// The lowercase wire name, also used as the advice-block key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomCategory::Respiratory => "respiratory",
            SymptomCategory::Gastrointestinal => "gastrointestinal",
            SymptomCategory::Neurological => "neurological",
            SymptomCategory::Cardiovascular => "cardiovascular",
            SymptomCategory::Musculoskeletal => "musculoskeletal",
            SymptomCategory::General => "general",
        }
    }
}

impl fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symptom as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: SymptomId,
    /// Patient-facing label (e.g. "Severe chest pain").
    pub name: String,
    pub category: SymptomCategory,
}

/// A symptom severity rank on the 1–5 scale.
///
/// The only way to build one from external input is [`Severity::clamped`],
/// so an out-of-range value can never reach the scoring code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(u8);

impl Severity {
    pub const MIN: Severity = Severity(1);
    pub const MODERATE: Severity = Severity(2);
    pub const MAX: Severity = Severity(5);

    /// Clamp an externally supplied rank into [1, 5].
    pub fn clamped(raw: i64) -> Self {
        Severity(raw.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Label shown next to the wizard slider.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Mild",
            2 => "Moderate",
            3 => "Severe",
            4 => "Very Severe",
            _ => "Extreme",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::MODERATE
    }
}
