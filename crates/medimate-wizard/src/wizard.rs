//! The symptom-checker wizard: a linear state machine driven by commands.
//!
//!   category-select → symptom-select → severity/duration → demographics
//!     → analyzing → results
//!
//! Forward moves are gated by validation. Backward moves only reach steps
//! already completed. Each field can only be edited on the step that owns
//! it, and nothing can be edited while an analysis is in flight.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use medimate_catalog::Catalog;
use medimate_contracts::{
    assessment::{AssessmentInput, AssessmentResult, EMPTY_SYMPTOMS_MESSAGE},
    error::{TriageError, TriageResult},
    symptom::{Severity, Symptom, SymptomCategory, SymptomId},
};
use medimate_core::{traits::AnalysisBackend, SymptomAnalyzer};

pub const NO_CATEGORY_MESSAGE: &str = "Please select a symptom category";
pub const NO_DURATION_MESSAGE: &str = "Please specify how long you have had these symptoms";
pub const NO_AGE_GROUP_MESSAGE: &str = "Please select your age group";

// ── Steps ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    CategorySelect,
    SymptomSelect,
    SeverityDuration,
    Demographics,
    Analyzing,
    Results,
}

impl WizardStep {
    pub const COUNT: usize = 6;

    /// Zero-based position, for progress display.
    pub fn index(&self) -> usize {
        match self {
            WizardStep::CategorySelect => 0,
            WizardStep::SymptomSelect => 1,
            WizardStep::SeverityDuration => 2,
            WizardStep::Demographics => 3,
            WizardStep::Analyzing => 4,
            WizardStep::Results => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::CategorySelect => "category-select",
            WizardStep::SymptomSelect => "symptom-select",
            WizardStep::SeverityDuration => "severity-duration",
            WizardStep::Demographics => "demographics",
            WizardStep::Analyzing => "analyzing",
            WizardStep::Results => "results",
        }
    }

    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CategorySelect => None,
            WizardStep::SymptomSelect => Some(WizardStep::CategorySelect),
            WizardStep::SeverityDuration => Some(WizardStep::SymptomSelect),
            WizardStep::Demographics => Some(WizardStep::SeverityDuration),
            WizardStep::Analyzing => None,
            WizardStep::Results => Some(WizardStep::Demographics),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Everything a client can ask the wizard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    SelectCategory(SymptomCategory),
    ToggleSymptom(SymptomId),
    /// Raw slider value; clamped into [1, 5].
    SetSeverity(SymptomId, i64),
    SetDuration(String),
    SetAgeGroup(String),
    SetGender(String),
    ToggleChronicCondition(String),
    Next,
    Back,
    Reset,
}

// ── Wizard ────────────────────────────────────────────────────────────────────

/// One patient's pass through the symptom checker.
pub struct Wizard {
    catalog: Arc<Catalog>,
    step: WizardStep,
    category: Option<SymptomCategory>,
    input: AssessmentInput,
    in_flight: bool,
    result: Option<AssessmentResult>,
}

impl Wizard {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            step: WizardStep::CategorySelect,
            category: None,
            input: AssessmentInput::default(),
            in_flight: false,
            result: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn category(&self) -> Option<SymptomCategory> {
        self.category
    }

    /// The assessment assembled so far.
    pub fn input(&self) -> &AssessmentInput {
        &self.input
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Symptoms offered on the symptom-select step.
    pub fn visible_symptoms(&self) -> Vec<&Symptom> {
        match self.category {
            Some(category) => self.catalog.symptoms_by_category(category),
            None => Vec::new(),
        }
    }

    /// Current slider value for a selected symptom.
    pub fn severity(&self, id: &SymptomId) -> Option<Severity> {
        self.input.severities.get(id).map(|&raw| Severity::clamped(raw))
    }

    /// Apply one command and return the step the wizard is on afterwards.
    ///
    /// # Errors
    ///
    /// - `Validation` when a forward move's gate is not satisfied, or a
    ///   command names an unknown or unselected symptom
    /// - `IllegalTransition` when the command does not apply to the current
    ///   step
    /// - `AnalysisInFlight` for any command while analyzing
    pub fn dispatch(&mut self, command: WizardCommand) -> TriageResult<WizardStep> {
        if self.in_flight {
            return Err(TriageError::AnalysisInFlight);
        }
        debug!(step = %self.step, ?command, "wizard command");

        match command {
            WizardCommand::SelectCategory(category) => {
                self.require_step(WizardStep::CategorySelect, "select a category")?;
                self.category = Some(category);
            }
            WizardCommand::ToggleSymptom(id) => {
                self.require_step(WizardStep::SymptomSelect, "toggle a symptom")?;
                if !self.catalog.contains_symptom(&id) {
                    return Err(TriageError::validation(format!("unknown symptom '{id}'")));
                }
                if !self.input.symptoms.remove(&id) {
                    self.input.symptoms.insert(id);
                } else {
                    self.input.severities.remove(&id);
                }
            }
            WizardCommand::SetSeverity(id, raw) => {
                self.require_step(WizardStep::SeverityDuration, "set a severity")?;
                if !self.input.symptoms.contains(&id) {
                    return Err(TriageError::validation(format!("symptom '{id}' is not selected")));
                }
                self.input
                    .severities
                    .insert(id, i64::from(Severity::clamped(raw).value()));
            }
            WizardCommand::SetDuration(duration) => {
                self.require_step(WizardStep::SeverityDuration, "set the duration")?;
                self.input.duration = Some(duration);
            }
            WizardCommand::SetAgeGroup(age_group) => {
                self.require_step(WizardStep::Demographics, "set the age group")?;
                self.input.age_group = Some(age_group);
            }
            WizardCommand::SetGender(gender) => {
                self.require_step(WizardStep::Demographics, "set the gender")?;
                self.input.gender = Some(gender);
            }
            WizardCommand::ToggleChronicCondition(condition) => {
                self.require_step(WizardStep::Demographics, "toggle a chronic condition")?;
                match self.input.chronic_conditions.iter().position(|c| *c == condition) {
                    Some(i) => {
                        self.input.chronic_conditions.remove(i);
                    }
                    None => self.input.chronic_conditions.push(condition),
                }
            }
            WizardCommand::Next => self.advance()?,
            WizardCommand::Back => self.retreat()?,
            WizardCommand::Reset => self.reset(),
        }

        Ok(self.step)
    }

    /// Mark the analysis as started and hand back the input to analyze.
    ///
    /// Only valid from demographics with every gate satisfied. The in-flight
    /// flag is checked and set here, so a second submission is refused until
    /// `complete_analysis` or `fail_analysis` runs.
    pub fn begin_analysis(&mut self) -> TriageResult<AssessmentInput> {
        if self.in_flight {
            warn!("analysis already in flight; submission ignored");
            return Err(TriageError::AnalysisInFlight);
        }
        self.require_step(WizardStep::Demographics, "submit the assessment")?;
        self.gate(WizardStep::SymptomSelect)?;
        self.gate(WizardStep::Demographics)?;

        self.in_flight = true;
        self.step = WizardStep::Analyzing;
        debug!(symptoms = self.input.symptoms.len(), "analysis started");
        Ok(self.input.clone())
    }

    /// Store the result of an in-flight analysis and show it.
    pub fn complete_analysis(&mut self, result: AssessmentResult) -> TriageResult<&AssessmentResult> {
        if !self.in_flight {
            return Err(TriageError::IllegalTransition {
                reason: "no analysis is in flight".to_string(),
            });
        }
        info!(
            emergency = result.is_emergency(),
            conditions = result.possible_conditions.len(),
            confidence = result.confidence,
            "analysis complete"
        );
        self.in_flight = false;
        self.step = WizardStep::Results;
        Ok(self.result.insert(result))
    }

    /// Abandon an in-flight analysis and return to demographics.
    pub fn fail_analysis(&mut self, reason: &str) {
        if self.in_flight {
            warn!(%reason, "analysis failed; returning to demographics");
        }
        self.in_flight = false;
        if self.step == WizardStep::Analyzing {
            self.step = WizardStep::Demographics;
        }
    }

    /// Run the analysis: try `remote`, fall back to `local` on any failure.
    ///
    /// Empty symptom sets are refused by `begin_analysis` and never reach
    /// either backend.
    pub fn submit(
        &mut self,
        remote: &dyn AnalysisBackend,
        local: &SymptomAnalyzer,
    ) -> TriageResult<&AssessmentResult> {
        let input = self.begin_analysis()?;

        let result = match remote.analyze(&input) {
            Ok(result) => result,
            Err(e) => {
                warn!(backend = remote.name(), error = %e, "remote analysis failed; using local analyzer");
                local.analyze(&input)
            }
        };

        self.complete_analysis(result)
    }

    /// Run the analysis with the local analyzer only.
    pub fn submit_local(&mut self, local: &SymptomAnalyzer) -> TriageResult<&AssessmentResult> {
        let input = self.begin_analysis()?;
        self.complete_analysis(local.analyze(&input))
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_step(&self, expected: WizardStep, action: &str) -> TriageResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(TriageError::IllegalTransition {
                reason: format!("cannot {action} on step {}", self.step),
            })
        }
    }

    /// Check the requirement for leaving `step`.
    fn gate(&self, step: WizardStep) -> TriageResult<()> {
        let missing = |field: &Option<String>| field.as_deref().map(str::trim).unwrap_or("").is_empty();

        let message = match step {
            WizardStep::CategorySelect if self.category.is_none() => Some(NO_CATEGORY_MESSAGE),
            WizardStep::SymptomSelect if self.input.symptoms.is_empty() => Some(EMPTY_SYMPTOMS_MESSAGE),
            WizardStep::SeverityDuration if missing(&self.input.duration) => Some(NO_DURATION_MESSAGE),
            WizardStep::Demographics if missing(&self.input.age_group) => Some(NO_AGE_GROUP_MESSAGE),
            _ => None,
        };

        match message {
            Some(m) => Err(TriageError::validation(m)),
            None => Ok(()),
        }
    }

    fn advance(&mut self) -> TriageResult<()> {
        let next = match self.step {
            WizardStep::CategorySelect => WizardStep::SymptomSelect,
            WizardStep::SymptomSelect => WizardStep::SeverityDuration,
            WizardStep::SeverityDuration => WizardStep::Demographics,
            WizardStep::Demographics | WizardStep::Analyzing | WizardStep::Results => {
                return Err(TriageError::IllegalTransition {
                    reason: format!("no next step from {}; submit or reset instead", self.step),
                });
            }
        };
        self.gate(self.step)?;

        if next == WizardStep::SeverityDuration {
            let default = i64::from(self.catalog.scoring().default_severity);
            for id in &self.input.symptoms {
                self.input.severities.entry(id.clone()).or_insert(default);
            }
        }

        debug!(from = %self.step, to = %next, "wizard advanced");
        self.step = next;
        Ok(())
    }

    fn retreat(&mut self) -> TriageResult<()> {
        let Some(previous) = self.step.previous() else {
            return Err(TriageError::IllegalTransition {
                reason: format!("no previous step from {}", self.step),
            });
        };
        if self.step == WizardStep::Results {
            self.result = None;
        }
        debug!(from = %self.step, to = %previous, "wizard went back");
        self.step = previous;
        Ok(())
    }

    fn reset(&mut self) {
        debug!(from = %self.step, "wizard reset");
        self.step = WizardStep::CategorySelect;
        self.category = None;
        self.input = AssessmentInput::default();
        self.result = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::embedded().unwrap())
    }

    fn wizard() -> Wizard {
        Wizard::new(catalog())
    }

    fn id(s: &str) -> SymptomId {
        SymptomId::new(s)
    }

    /// Drive a fresh wizard to the demographics step with cough and fever.
    fn wizard_at_demographics() -> Wizard {
        let mut w = wizard();
        for command in [
            WizardCommand::SelectCategory(SymptomCategory::Respiratory),
            WizardCommand::Next,
            WizardCommand::ToggleSymptom(id("cough")),
            WizardCommand::ToggleSymptom(id("fever")),
            WizardCommand::Next,
            WizardCommand::SetDuration("3 days".to_string()),
            WizardCommand::Next,
        ] {
            w.dispatch(command).unwrap();
        }
        assert_eq!(w.step(), WizardStep::Demographics);
        w
    }

    fn assert_validation(result: TriageResult<WizardStep>, expected: &str) {
        match result {
            Err(TriageError::Validation { reason }) => assert_eq!(reason, expected),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    /// Counts calls and always fails, standing in for an unreachable service.
    struct FailingRemote {
        calls: AtomicUsize,
    }

    impl AnalysisBackend for FailingRemote {
        fn analyze(&self, _input: &AssessmentInput) -> TriageResult<AssessmentResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TriageError::RemoteAnalysisFailed {
                reason: "connection refused".to_string(),
            })
        }

        fn name(&self) -> &str {
            "remote"
        }
    }

    /// Returns a fixed result and counts calls.
    struct FixedRemote {
        calls: AtomicUsize,
    }

    impl AnalysisBackend for FixedRemote {
        fn analyze(&self, _input: &AssessmentInput) -> TriageResult<AssessmentResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AssessmentResult {
                confidence: 77,
                emergency_alert: None,
                possible_conditions: vec![],
                recommendations: vec![],
            })
        }

        fn name(&self) -> &str {
            "remote"
        }
    }

    // ── 1. validation gates ───────────────────────────────────────────────────

    #[test]
    fn test_category_required_to_advance() {
        let mut w = wizard();
        assert_validation(w.dispatch(WizardCommand::Next), NO_CATEGORY_MESSAGE);
        assert_eq!(w.step(), WizardStep::CategorySelect);
    }

    #[test]
    fn test_symptom_required_to_advance() {
        let mut w = wizard();
        w.dispatch(WizardCommand::SelectCategory(SymptomCategory::General)).unwrap();
        w.dispatch(WizardCommand::Next).unwrap();

        assert_validation(w.dispatch(WizardCommand::Next), EMPTY_SYMPTOMS_MESSAGE);
        assert_eq!(w.step(), WizardStep::SymptomSelect);
    }

    #[test]
    fn test_duration_required_to_advance() {
        let mut w = wizard();
        w.dispatch(WizardCommand::SelectCategory(SymptomCategory::General)).unwrap();
        w.dispatch(WizardCommand::Next).unwrap();
        w.dispatch(WizardCommand::ToggleSymptom(id("fever"))).unwrap();
        w.dispatch(WizardCommand::Next).unwrap();

        assert_validation(w.dispatch(WizardCommand::Next), NO_DURATION_MESSAGE);
        w.dispatch(WizardCommand::SetDuration("   ".to_string())).unwrap();
        assert_validation(w.dispatch(WizardCommand::Next), NO_DURATION_MESSAGE);
    }

    #[test]
    fn test_age_group_required_to_submit() {
        let mut w = wizard_at_demographics();
        match w.submit_local(&SymptomAnalyzer::new(catalog())) {
            Err(TriageError::Validation { reason }) => assert_eq!(reason, NO_AGE_GROUP_MESSAGE),
            other => panic!("expected Validation, got {:?}", other),
        }
        assert!(!w.is_in_flight());
        assert_eq!(w.step(), WizardStep::Demographics);
    }

    // ── 2. field edits ────────────────────────────────────────────────────────

    #[test]
    fn test_entering_severity_step_seeds_moderate() {
        let mut w = wizard_at_demographics();
        assert_eq!(w.severity(&id("cough")), Some(Severity::MODERATE));
        assert_eq!(w.severity(&id("fever")), Some(Severity::MODERATE));

        // Explicit values survive a round trip through the step.
        w.dispatch(WizardCommand::Back).unwrap();
        w.dispatch(WizardCommand::SetSeverity(id("cough"), 4)).unwrap();
        w.dispatch(WizardCommand::Back).unwrap();
        w.dispatch(WizardCommand::Next).unwrap();
        assert_eq!(w.severity(&id("cough")).map(|s| s.value()), Some(4));
    }

    #[test]
    fn test_severity_slider_clamps() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::Back).unwrap();
        w.dispatch(WizardCommand::SetSeverity(id("fever"), 12)).unwrap();
        assert_eq!(w.input().severities[&id("fever")], 5);
    }

    #[test]
    fn test_deselecting_symptom_drops_severity() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::Back).unwrap();
        w.dispatch(WizardCommand::Back).unwrap();
        assert_eq!(w.step(), WizardStep::SymptomSelect);

        w.dispatch(WizardCommand::ToggleSymptom(id("fever"))).unwrap();
        assert!(!w.input().symptoms.contains(&id("fever")));
        assert!(!w.input().severities.contains_key(&id("fever")));
        assert!(w.input().severities.contains_key(&id("cough")));
    }

    #[test]
    fn test_unknown_symptom_rejected() {
        let mut w = wizard();
        w.dispatch(WizardCommand::SelectCategory(SymptomCategory::General)).unwrap();
        w.dispatch(WizardCommand::Next).unwrap();
        match w.dispatch(WizardCommand::ToggleSymptom(id("hiccups"))) {
            Err(TriageError::Validation { reason }) => assert!(reason.contains("hiccups")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_field_edit_on_wrong_step_is_illegal() {
        let mut w = wizard();
        match w.dispatch(WizardCommand::SetDuration("3 days".to_string())) {
            Err(TriageError::IllegalTransition { reason }) => {
                assert!(reason.contains("category-select"), "got: {reason}");
            }
            other => panic!("expected IllegalTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_chronic_condition_toggles() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::ToggleChronicCondition("diabetes".to_string())).unwrap();
        w.dispatch(WizardCommand::ToggleChronicCondition("asthma".to_string())).unwrap();
        w.dispatch(WizardCommand::ToggleChronicCondition("diabetes".to_string())).unwrap();
        assert_eq!(w.input().chronic_conditions, vec!["asthma".to_string()]);
    }

    #[test]
    fn test_visible_symptoms_follow_category() {
        let mut w = wizard();
        assert!(w.visible_symptoms().is_empty());
        w.dispatch(WizardCommand::SelectCategory(SymptomCategory::Cardiovascular)).unwrap();
        assert!(w
            .visible_symptoms()
            .iter()
            .all(|s| s.category == SymptomCategory::Cardiovascular));
    }

    // ── 3. navigation ─────────────────────────────────────────────────────────

    #[test]
    fn test_back_from_first_step_is_illegal() {
        let mut w = wizard();
        assert!(matches!(
            w.dispatch(WizardCommand::Back),
            Err(TriageError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn test_next_from_demographics_is_illegal() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();
        assert!(matches!(
            w.dispatch(WizardCommand::Next),
            Err(TriageError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn test_back_from_results_clears_result() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();
        w.submit_local(&SymptomAnalyzer::new(catalog())).unwrap();
        assert_eq!(w.step(), WizardStep::Results);

        assert_eq!(w.dispatch(WizardCommand::Back).unwrap(), WizardStep::Demographics);
        assert!(w.result().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut w = wizard_at_demographics();
        assert_eq!(w.dispatch(WizardCommand::Reset).unwrap(), WizardStep::CategorySelect);
        assert!(w.category().is_none());
        assert_eq!(w.input(), &AssessmentInput::default());
    }

    // ── 4. submission ─────────────────────────────────────────────────────────

    #[test]
    fn test_submit_local_reaches_results() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();

        let result = w.submit_local(&SymptomAnalyzer::new(catalog())).unwrap();
        assert_eq!(result.top_condition().unwrap().condition, "Acute Bronchitis");
        assert_eq!(w.step(), WizardStep::Results);
        assert!(!w.is_in_flight());
    }

    #[test]
    fn test_remote_failure_falls_back_to_local() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();
        let remote = FailingRemote { calls: AtomicUsize::new(0) };

        let result = w.submit(&remote, &SymptomAnalyzer::new(catalog())).unwrap();

        assert_eq!(result.top_condition().unwrap().condition, "Acute Bronchitis");
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
        assert_eq!(w.step(), WizardStep::Results);
    }

    #[test]
    fn test_remote_success_is_used() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();
        let remote = FixedRemote { calls: AtomicUsize::new(0) };

        let result = w.submit(&remote, &SymptomAnalyzer::new(catalog())).unwrap();
        assert_eq!(result.confidence, 77);
    }

    /// The analyzer is never reached with an empty selection.
    #[test]
    fn test_empty_selection_never_reaches_backend() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();
        // Deselect everything on the symptom step.
        w.dispatch(WizardCommand::Back).unwrap();
        w.dispatch(WizardCommand::Back).unwrap();
        w.dispatch(WizardCommand::ToggleSymptom(id("cough"))).unwrap();
        w.dispatch(WizardCommand::ToggleSymptom(id("fever"))).unwrap();
        assert_validation(w.dispatch(WizardCommand::Next), EMPTY_SYMPTOMS_MESSAGE);

        let remote = FixedRemote { calls: AtomicUsize::new(0) };
        assert!(w.submit(&remote, &SymptomAnalyzer::new(catalog())).is_err());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_second_submission_refused_while_in_flight() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();

        let input = w.begin_analysis().unwrap();
        assert!(!input.symptoms.is_empty());
        assert_eq!(w.step(), WizardStep::Analyzing);

        assert!(matches!(w.begin_analysis(), Err(TriageError::AnalysisInFlight)));
        assert!(matches!(
            w.dispatch(WizardCommand::Reset),
            Err(TriageError::AnalysisInFlight)
        ));
    }

    #[test]
    fn test_failed_analysis_rolls_back_to_demographics() {
        let mut w = wizard_at_demographics();
        w.dispatch(WizardCommand::SetAgeGroup("adult".to_string())).unwrap();
        w.begin_analysis().unwrap();

        w.fail_analysis("backend unavailable");

        assert_eq!(w.step(), WizardStep::Demographics);
        assert!(!w.is_in_flight());
        // A fresh submission is accepted afterwards.
        assert!(w.begin_analysis().is_ok());
    }

    #[test]
    fn test_complete_without_begin_is_illegal() {
        let mut w = wizard();
        let result = AssessmentResult {
            confidence: 50,
            emergency_alert: None,
            possible_conditions: vec![],
            recommendations: vec![],
        };
        assert!(matches!(
            w.complete_analysis(result),
            Err(TriageError::IllegalTransition { .. })
        ));
    }
}
