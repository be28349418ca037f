//! Canned patient walkthroughs.
//!
//! Each scenario is a scripted sequence of wizard commands ending on the
//! demographics step. Running one drives a fresh `Wizard` through the
//! script and submits it to the local analyzer, exercising every gate on
//! the way. The demo CLI replays them; the tests pin their outcomes.
//!
//! All patients are fictional.

use std::sync::Arc;

use tracing::info;

use medimate_catalog::Catalog;
use medimate_contracts::{
    assessment::AssessmentResult,
    error::TriageResult,
    symptom::{SymptomCategory, SymptomId},
};
use medimate_core::SymptomAnalyzer;

use crate::wizard::{Wizard, WizardCommand};

/// A named, scripted wizard session.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub summary: &'static str,
    pub commands: Vec<WizardCommand>,
}

impl Scenario {
    /// Replay the script on a fresh wizard and analyze locally.
    pub fn run(&self, catalog: Arc<Catalog>) -> TriageResult<AssessmentResult> {
        let analyzer = SymptomAnalyzer::new(Arc::clone(&catalog));
        let mut wizard = Wizard::new(catalog);

        for command in &self.commands {
            wizard.dispatch(command.clone())?;
        }
        let result = wizard.submit_local(&analyzer)?.clone();

        info!(
            scenario = self.name,
            emergency = result.is_emergency(),
            top = result.top_condition().map(|c| c.condition.as_str()).unwrap_or("none"),
            "scenario complete"
        );
        Ok(result)
    }
}

// ── Script builder ────────────────────────────────────────────────────────────

/// Fluent builder for the common script shape.
struct Script {
    commands: Vec<WizardCommand>,
}

impl Script {
    fn category(category: SymptomCategory) -> Self {
        Self {
            commands: vec![WizardCommand::SelectCategory(category), WizardCommand::Next],
        }
    }

    fn symptoms(mut self, ids: &[&str]) -> Self {
        self.commands
            .extend(ids.iter().map(|id| WizardCommand::ToggleSymptom(SymptomId::new(*id))));
        self.commands.push(WizardCommand::Next);
        self
    }

    fn severity(mut self, id: &str, rank: i64) -> Self {
        self.commands.push(WizardCommand::SetSeverity(SymptomId::new(id), rank));
        self
    }

    fn duration(mut self, duration: &str) -> Self {
        self.commands.push(WizardCommand::SetDuration(duration.to_string()));
        self.commands.push(WizardCommand::Next);
        self
    }

    fn patient(mut self, age_group: &str, gender: &str) -> Self {
        self.commands.push(WizardCommand::SetAgeGroup(age_group.to_string()));
        self.commands.push(WizardCommand::SetGender(gender.to_string()));
        self
    }

    fn chronic(mut self, condition: &str) -> Self {
        self.commands
            .push(WizardCommand::ToggleChronicCondition(condition.to_string()));
        self
    }

    fn build(self) -> Vec<WizardCommand> {
        self.commands
    }
}

// ── Catalog of scenarios ──────────────────────────────────────────────────────

/// Every canned scenario, in demo order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "respiratory-infection",
            summary: "Adult with a cough and mild fever for three days",
            commands: Script::category(SymptomCategory::Respiratory)
                .symptoms(&["cough", "fever"])
                .duration("3 days")
                .patient("adult", "female")
                .build(),
        },
        Scenario {
            name: "cardiac-emergency",
            summary: "Senior with severe chest pain and palpitations since this morning",
            commands: Script::category(SymptomCategory::Cardiovascular)
                .symptoms(&["severe-chest-pain", "palpitations"])
                .severity("severe-chest-pain", 5)
                .duration("less than 24 hours")
                .patient("senior", "male")
                .chronic("hypertension")
                .build(),
        },
        Scenario {
            name: "stomach-bug",
            summary: "Adult with nausea, vomiting and diarrhea for two days",
            commands: Script::category(SymptomCategory::Gastrointestinal)
                .symptoms(&["nausea", "vomiting", "diarrhea"])
                .duration("2 days")
                .patient("adult", "male")
                .chronic("diabetes")
                .build(),
        },
        Scenario {
            name: "fever-and-chills",
            summary: "Young adult with recurring fever, chills and sweating for a week",
            commands: Script::category(SymptomCategory::General)
                .symptoms(&["fever", "chills", "sweating", "headache"])
                .severity("fever", 3)
                .duration("1 week")
                .patient("young-adult", "female")
                .build(),
        },
        Scenario {
            name: "stiff-joints",
            summary: "Senior with painful, swollen, stiff joints for three months",
            commands: Script::category(SymptomCategory::Musculoskeletal)
                .symptoms(&["joint-pain", "joint-swelling", "stiffness"])
                .severity("joint-pain", 3)
                .severity("joint-swelling", 3)
                .severity("stiffness", 3)
                .duration("3 months")
                .patient("senior", "female")
                .build(),
        },
    ]
}

/// Look up a scenario by name.
pub fn find(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
