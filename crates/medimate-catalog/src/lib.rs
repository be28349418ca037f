//! # medimate-catalog
//!
//! The TOML-driven symptom catalog for the MediMate triage service.
//!
//! ## Overview
//!
//! This crate provides [`Catalog`], the fixed reference data the analyzer
//! matches against: symptoms and their categories, conditions and their
//! defining symptoms, per-category advice, the emergency trigger list and
//! the scoring constants. It is loaded once at startup, validated, and never
//! mutated afterwards.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use medimate_catalog::Catalog;
//!
//! let catalog = Catalog::embedded()?;
//! let respiratory = catalog.symptoms_by_category(SymptomCategory::Respiratory);
//! ```

pub mod catalog;
pub mod schema;

pub use catalog::Catalog;
pub use schema::{AdviceBlock, CatalogConfig, EmergencyConfig, GeneralAdvice, ScoringPolicy};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use medimate_contracts::{
        error::TriageError,
        symptom::{SymptomCategory, SymptomId},
    };

    use crate::Catalog;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Assert that `toml` fails to load with a config error mentioning `needle`.
    fn assert_config_error(toml: &str, needle: &str) {
        match Catalog::from_toml_str(toml) {
            Err(TriageError::ConfigError { reason }) => {
                assert!(reason.contains(needle), "expected '{needle}' in reason, got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    const TWO_SYMPTOMS: &str = r#"
        [[symptoms]]
        id = "cough"
        name = "Cough"
        category = "respiratory"

        [[symptoms]]
        id = "fever"
        name = "Fever"
        category = "general"
    "#;

    // ── 1. embedded catalog ───────────────────────────────────────────────────

    /// The shipped catalog must always pass validation.
    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();

        assert!(!catalog.is_empty());
        assert!(catalog.contains_symptom(&SymptomId::new("cough")));
        assert!(catalog.is_emergency_symptom(&SymptomId::new("severe-chest-pain")));
        assert!(!catalog.is_emergency_symptom(&SymptomId::new("cough")));
        assert_eq!(catalog.scoring().default_severity, 2);
    }

    /// Every category has symptoms and an advice block in the shipped catalog.
    #[test]
    fn test_embedded_catalog_covers_every_category() {
        let catalog = Catalog::embedded().unwrap();
        for category in SymptomCategory::ALL {
            assert!(
                !catalog.symptoms_by_category(category).is_empty(),
                "no symptoms for {category}"
            );
            assert!(catalog.advice_for(category).is_some(), "no advice for {category}");
        }
    }

    // ── 2. empty catalog ──────────────────────────────────────────────────────

    #[test]
    fn test_empty_catalog_has_general_advice_only() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.symptoms().is_empty());
        assert!(catalog.advice_for(SymptomCategory::Respiratory).is_none());
        assert!(!catalog.general_advice().is_empty());
    }

    /// A document with no tables at all loads with defaults.
    #[test]
    fn test_blank_document_uses_defaults() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.scoring().min_confidence, 50);
        assert_eq!(catalog.emergency().message, "Seek immediate medical attention");
    }

    // ── 3. queries ────────────────────────────────────────────────────────────

    #[test]
    fn test_symptoms_by_category_keeps_catalog_order() {
        let toml = format!(
            "{TWO_SYMPTOMS}
            [[symptoms]]
            id = \"wheezing\"
            name = \"Wheezing\"
            category = \"respiratory\"
            "
        );
        let catalog = Catalog::from_toml_str(&toml).unwrap();
        let ids: Vec<&str> = catalog
            .symptoms_by_category(SymptomCategory::Respiratory)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["cough", "wheezing"]);
        assert_eq!(catalog.symptom(&SymptomId::new("fever")).unwrap().name, "Fever");
        assert!(catalog.symptom(&SymptomId::new("rash")).is_none());
    }

    // ── 4. validation failures ────────────────────────────────────────────────

    #[test]
    fn test_duplicate_symptom_rejected() {
        let toml = format!(
            "{TWO_SYMPTOMS}
            [[symptoms]]
            id = \"cough\"
            name = \"Cough again\"
            category = \"respiratory\"
            "
        );
        assert_config_error(&toml, "duplicate symptom id 'cough'");
    }

    #[test]
    fn test_condition_with_unknown_symptom_rejected() {
        let toml = format!(
            "{TWO_SYMPTOMS}
            [[conditions]]
            name = \"Flu\"
            category = \"respiratory\"
            symptoms = [\"cough\", \"sneezing\"]
            description = \"\"
            urgency = \"soon\"
            priority = \"medium\"
            "
        );
        assert_config_error(&toml, "unknown symptom 'sneezing'");
    }

    #[test]
    fn test_condition_without_symptoms_rejected() {
        let toml = format!(
            "{TWO_SYMPTOMS}
            [[conditions]]
            name = \"Nothing\"
            category = \"general\"
            symptoms = []
            description = \"\"
            urgency = \"routine\"
            priority = \"low\"
            "
        );
        assert_config_error(&toml, "has no defining symptoms");
    }

    /// With severity_bonus = 50 a condition may have at most two symptoms.
    #[test]
    fn test_condition_over_monotonicity_bound_rejected() {
        let toml = format!(
            "[scoring]
            severity_bonus = 50
            {TWO_SYMPTOMS}
            [[symptoms]]
            id = \"chills\"
            name = \"Chills\"
            category = \"general\"

            [[conditions]]
            name = \"Flu\"
            category = \"respiratory\"
            symptoms = [\"cough\", \"fever\", \"chills\"]
            description = \"\"
            urgency = \"soon\"
            priority = \"medium\"
            "
        );
        assert_config_error(&toml, "at most 2 allowed");
    }

    #[test]
    fn test_unknown_emergency_symptom_rejected() {
        let toml = format!(
            "[emergency]
            symptoms = [\"seizure\"]
            {TWO_SYMPTOMS}"
        );
        assert_config_error(&toml, "emergency list references unknown symptom 'seizure'");
    }

    #[test]
    fn test_out_of_range_scoring_rejected() {
        assert_config_error("[scoring]\nemergency_severity = 9\n", "emergency_severity");
        assert_config_error("[scoring]\nhigh_severity_average = 0.5\n", "high_severity_average");
    }

    #[test]
    fn test_duplicate_advice_block_rejected() {
        let toml = r#"
            [[advice]]
            category = "respiratory"
            items = ["a"]

            [[advice]]
            category = "respiratory"
            items = ["b"]
        "#;
        assert_config_error(toml, "duplicate advice block");
    }

    #[test]
    fn test_condition_category_without_advice_rejected() {
        let toml = format!(
            "{TWO_SYMPTOMS}
            [[advice]]
            category = \"general\"
            items = [\"Rest\"]

            [[conditions]]
            name = \"Cold\"
            category = \"respiratory\"
            symptoms = [\"cough\"]
            description = \"\"
            urgency = \"routine\"
            priority = \"low\"
            "
        );
        assert_config_error(&toml, "category 'respiratory', which has no advice block");
    }

    #[test]
    fn test_condition_category_with_advice_loads() {
        let toml = format!(
            "{TWO_SYMPTOMS}
            [[advice]]
            category = \"respiratory\"
            items = [\"Drink warm fluids\"]

            [[conditions]]
            name = \"Cold\"
            category = \"respiratory\"
            symptoms = [\"cough\"]
            description = \"\"
            urgency = \"routine\"
            priority = \"low\"
            "
        );
        let catalog = Catalog::from_toml_str(&toml).unwrap();
        assert_eq!(catalog.conditions().len(), 1);
        assert!(catalog.advice_for(SymptomCategory::Respiratory).is_some());
    }

    #[test]
    fn test_empty_general_block_rejected() {
        assert_config_error("[general]\nitems = []\n", "general advice block");
    }

    // ── 5. TOML parse error ───────────────────────────────────────────────────

    /// Malformed TOML must produce a `TriageError::ConfigError`.
    #[test]
    fn test_toml_parse_error() {
        assert_config_error("this is not valid toml ][[[", "failed to parse catalog TOML");
    }

    /// An unknown category name is a parse error, not a silent default.
    #[test]
    fn test_unknown_category_is_parse_error() {
        let toml = r#"
            [[symptoms]]
            id = "itch"
            name = "Itch"
            category = "dermatological"
        "#;
        assert_config_error(toml, "failed to parse catalog TOML");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        match Catalog::from_file(std::path::Path::new("/nonexistent/catalog.toml")) {
            Err(TriageError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read catalog file"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
