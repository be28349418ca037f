//! The validated, immutable symptom catalog.
//!
//! `Catalog` is built once at startup from a `CatalogConfig` (TOML) and then
//! shared read-only, typically behind an `Arc`. Validation rules:
//!
//! 1. Symptom ids are unique.
//! 2. Every condition has at least one defining symptom, no duplicates, all
//!    of them known, and no more than `ScoringPolicy::max_defining_symptoms`.
//! 3. Every emergency trigger is a known symptom.
//! 4. Advice blocks are unique per category, every category a condition
//!    uses has one, and the general block is not empty.
//! 5. Scoring constants sit inside their documented ranges.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use medimate_contracts::{
    condition::Condition,
    error::{TriageError, TriageResult},
    symptom::{Symptom, SymptomCategory, SymptomId},
};

use crate::schema::{CatalogConfig, EmergencyConfig, GeneralAdvice, ScoringPolicy};

/// The catalog shipped with the service.
const EMBEDDED_CATALOG: &str = include_str!("../catalog/default.toml");

/// Validated reference data for the analyzer and the wizard.
///
/// ```rust,ignore
/// use medimate_catalog::Catalog;
///
/// let catalog = Catalog::from_file(Path::new("catalog/default.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    symptoms: Vec<Symptom>,
    index: HashMap<SymptomId, usize>,
    conditions: Vec<Condition>,
    advice: BTreeMap<SymptomCategory, Vec<String>>,
    general: GeneralAdvice,
    emergency: EmergencyConfig,
    scoring: ScoringPolicy,
}

impl Catalog {
    /// Parse `s` as TOML and build a validated `Catalog`.
    ///
    /// Returns `TriageError::ConfigError` if the TOML is malformed, does not
    /// match `CatalogConfig`, or fails validation.
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        let config: CatalogConfig = toml::from_str(s).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to parse catalog TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a TOML catalog.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        let catalog = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            symptoms = catalog.symptoms.len(),
            conditions = catalog.conditions.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The default catalog compiled into the binary.
    pub fn embedded() -> TriageResult<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    /// A catalog with no symptoms or conditions and default advice.
    pub fn empty() -> Self {
        Self {
            symptoms: Vec::new(),
            index: HashMap::new(),
            conditions: Vec::new(),
            advice: BTreeMap::new(),
            general: GeneralAdvice::default(),
            emergency: EmergencyConfig::default(),
            scoring: ScoringPolicy::default(),
        }
    }

    /// Validate `config` and build the lookup indexes.
    pub fn from_config(config: CatalogConfig) -> TriageResult<Self> {
        validate_scoring(&config.scoring)?;

        let mut index = HashMap::with_capacity(config.symptoms.len());
        for (pos, symptom) in config.symptoms.iter().enumerate() {
            if index.insert(symptom.id.clone(), pos).is_some() {
                return Err(config_error(format!("duplicate symptom id '{}'", symptom.id)));
            }
        }

        let max_defining = config.scoring.max_defining_symptoms();
        for condition in &config.conditions {
            if condition.symptoms.is_empty() {
                return Err(config_error(format!(
                    "condition '{}' has no defining symptoms",
                    condition.name
                )));
            }
            if condition.symptoms.len() > max_defining {
                return Err(config_error(format!(
                    "condition '{}' has {} defining symptoms; at most {} allowed with severity_bonus {}",
                    condition.name,
                    condition.symptoms.len(),
                    max_defining,
                    config.scoring.severity_bonus
                )));
            }
            let mut seen = HashSet::new();
            for id in &condition.symptoms {
                if !index.contains_key(id) {
                    return Err(config_error(format!(
                        "condition '{}' references unknown symptom '{}'",
                        condition.name, id
                    )));
                }
                if !seen.insert(id) {
                    return Err(config_error(format!(
                        "condition '{}' lists symptom '{}' twice",
                        condition.name, id
                    )));
                }
            }
        }

        for id in &config.emergency.symptoms {
            if !index.contains_key(id) {
                return Err(config_error(format!("emergency list references unknown symptom '{}'", id)));
            }
        }

        let mut advice = BTreeMap::new();
        for block in config.advice {
            if advice.insert(block.category, block.items).is_some() {
                return Err(config_error(format!(
                    "duplicate advice block for category '{}'",
                    block.category
                )));
            }
        }

        if let Some(condition) = config
            .conditions
            .iter()
            .find(|c| !advice.contains_key(&c.category))
        {
            return Err(config_error(format!(
                "condition '{}' is in category '{}', which has no advice block",
                condition.name, condition.category
            )));
        }

        if config.general.items.is_empty() {
            return Err(config_error("general advice block must not be empty".to_string()));
        }

        debug!(
            symptoms = config.symptoms.len(),
            conditions = config.conditions.len(),
            advice_blocks = advice.len(),
            "catalog validated"
        );

        Ok(Self {
            symptoms: config.symptoms,
            index,
            conditions: config.conditions,
            advice,
            general: config.general,
            emergency: config.emergency,
            scoring: config.scoring,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn symptom(&self, id: &SymptomId) -> Option<&Symptom> {
        self.index.get(id).map(|&pos| &self.symptoms[pos])
    }

    pub fn contains_symptom(&self, id: &SymptomId) -> bool {
        self.index.contains_key(id)
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// Symptoms of one category, in catalog order.
    pub fn symptoms_by_category(&self, category: SymptomCategory) -> Vec<&Symptom> {
        self.symptoms.iter().filter(|s| s.category == category).collect()
    }

    /// Conditions in declaration order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The advice block for `category`, if the catalog defines one.
    pub fn advice_for(&self, category: SymptomCategory) -> Option<&[String]> {
        self.advice.get(&category).map(Vec::as_slice)
    }

    pub fn general_advice(&self) -> &[String] {
        &self.general.items
    }

    pub fn emergency(&self) -> &EmergencyConfig {
        &self.emergency
    }

    pub fn is_emergency_symptom(&self, id: &SymptomId) -> bool {
        self.emergency.symptoms.contains(id)
    }

    pub fn scoring(&self) -> &ScoringPolicy {
        &self.scoring
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

fn validate_scoring(scoring: &ScoringPolicy) -> TriageResult<()> {
    if !(1..=5).contains(&scoring.default_severity) {
        return Err(config_error(format!(
            "scoring.default_severity {} outside 1..=5",
            scoring.default_severity
        )));
    }
    if !(1..=5).contains(&scoring.emergency_severity) {
        return Err(config_error(format!(
            "scoring.emergency_severity {} outside 1..=5",
            scoring.emergency_severity
        )));
    }
    if !(1.0..=5.0).contains(&scoring.high_severity_average) {
        return Err(config_error(format!(
            "scoring.high_severity_average {} outside 1.0..=5.0",
            scoring.high_severity_average
        )));
    }
    if scoring.severity_bonus > 50 {
        return Err(config_error(format!(
            "scoring.severity_bonus {} exceeds 50",
            scoring.severity_bonus
        )));
    }
    if scoring.short_duration_penalty > 100 || scoring.min_confidence > 100 {
        return Err(config_error(
            "scoring.short_duration_penalty and scoring.min_confidence must be at most 100".to_string(),
        ));
    }
    Ok(())
}

fn config_error(reason: String) -> TriageError {
    TriageError::ConfigError { reason }
}
