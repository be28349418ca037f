//! Catalog document schema.
//!
//! A `CatalogConfig` is deserialized from TOML and holds the symptom list,
//! the condition definitions, the advice blocks and the scoring constants.
//! It is raw input: `Catalog::from_config` validates it before use.

use serde::{Deserialize, Serialize};

use medimate_contracts::{
    condition::Condition,
    symptom::{Symptom, SymptomCategory, SymptomId},
};

/// Tunable constants for the analyzer's scoring policy.
///
/// Every field has a default, so a catalog may omit `[scoring]` entirely.
///
/// Example in TOML:
/// ```toml
/// [scoring]
/// severity_bonus = 10
/// short_duration_penalty = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Severity assumed for a selected symptom with no explicit rank.
    pub default_severity: u8,
    /// Any selected symptom at or above this severity trips the emergency screen.
    pub emergency_severity: u8,
    /// Average matched severity at or above which a condition earns the bonus.
    pub high_severity_average: f64,
    /// Probability points added for a high average severity.
    pub severity_bonus: u8,
    /// Probability points removed when the duration is only hours.
    pub short_duration_penalty: u8,
    /// Confidence floor, and the confidence reported with no matches.
    pub min_confidence: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            default_severity: 2,
            emergency_severity: 4,
            high_severity_average: 3.5,
            severity_bonus: 10,
            short_duration_penalty: 10,
            min_confidence: 50,
        }
    }
}

impl ScoringPolicy {
    /// The largest number of defining symptoms a condition may have.
    ///
    /// Adding one matching symptom raises the base score by `100 / total`
    /// points and can cost at most `severity_bonus` points, so `total` is
    /// capped at `100 / severity_bonus` to keep probabilities monotonic.
    pub fn max_defining_symptoms(&self) -> usize {
        match self.severity_bonus {
            0 => usize::MAX,
            bonus => 100 / bonus as usize,
        }
    }
}

/// The emergency screen's fixed trigger list and alert text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// Symptoms that raise the alert whatever their severity.
    #[serde(default)]
    pub symptoms: Vec<SymptomId>,
    #[serde(default = "default_emergency_message")]
    pub message: String,
    #[serde(default = "default_emergency_instructions")]
    pub instructions: String,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            symptoms: Vec::new(),
            message: default_emergency_message(),
            instructions: default_emergency_instructions(),
        }
    }
}

fn default_emergency_message() -> String {
    "Seek immediate medical attention".to_string()
}

fn default_emergency_instructions() -> String {
    "Contact emergency services or visit the nearest hospital immediately".to_string()
}

/// Advice shown when a condition of `category` is in the differential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceBlock {
    pub category: SymptomCategory,
    pub items: Vec<String>,
}

/// Advice shown with every result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralAdvice {
    pub items: Vec<String>,
}

impl Default for GeneralAdvice {
    fn default() -> Self {
        Self {
            items: vec![
                "Monitor your symptoms closely".to_string(),
                "Rest and stay well-hydrated".to_string(),
                "Consult a healthcare provider if symptoms worsen".to_string(),
            ],
        }
    }
}

/// The top-level structure deserialized from a TOML catalog file.
///
/// Example:
/// ```toml
/// [[symptoms]]
/// id = "cough"
/// name = "Cough"
/// category = "respiratory"
///
/// [[conditions]]
/// name = "Common Cold"
/// category = "respiratory"
/// symptoms = ["cough", "runny-nose"]
/// description = "Viral infection of the upper respiratory tract."
/// urgency = "routine"
/// priority = "low"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub emergency: EmergencyConfig,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    /// Evaluated in declaration order; ranking ties keep this order.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub advice: Vec<AdviceBlock>,
    #[serde(default)]
    pub general: GeneralAdvice,
}
