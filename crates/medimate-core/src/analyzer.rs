//! The rule-based symptom analyzer.
//!
//! One call runs the whole pipeline against the immutable catalog:
//!
//!   Emergency screen → Condition matching → Ranking → Confidence → Advice
//!
//! The emergency screen never short-circuits: an emergency result still
//! carries the full ranked differential and recommendations.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use medimate_catalog::Catalog;
use medimate_contracts::{
    assessment::{AssessmentInput, AssessmentResult, EmergencyAlert, MatchedCondition, Recommendation},
    condition::{Condition, Urgency},
    error::TriageResult,
    symptom::{Severity, SymptomCategory, SymptomId},
};

use crate::{
    scoring::{self, DurationBand},
    traits::AnalysisBackend,
};

/// Deterministic analyzer over a shared catalog.
///
/// Cheap to clone; the catalog is behind an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct SymptomAnalyzer {
    catalog: Arc<Catalog>,
}

impl SymptomAnalyzer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Analyze one assessment.
    ///
    /// Never fails. An empty symptom set is the caller's responsibility to
    /// reject; given one, this returns no conditions and the confidence floor.
    pub fn analyze(&self, input: &AssessmentInput) -> AssessmentResult {
        let policy = self.catalog.scoring();
        let band = DurationBand::classify(input.duration.as_deref());

        // ── Step 1: Emergency screen ─────────────────────────────────────────
        let emergency_alert = self.screen(input);
        debug!(
            triggered = emergency_alert.is_some(),
            triggers = emergency_alert.as_ref().map(|a| a.triggers.len()).unwrap_or(0),
            "emergency screen complete"
        );

        // ── Step 2: Condition matching ───────────────────────────────────────
        let mut ranked: Vec<MatchedCondition> = self
            .catalog
            .conditions()
            .iter()
            .filter_map(|condition| self.match_condition(condition, input, band))
            .collect();

        // ── Step 3: Ranking ──────────────────────────────────────────────────
        //
        // `sort_by` is stable, so full ties keep catalog order.
        ranked.sort_by(|a, b| {
            b.probability
                .cmp(&a.probability)
                .then(b.matched_symptoms.cmp(&a.matched_symptoms))
                .then(b.priority.rank().cmp(&a.priority.rank()))
        });
        debug!(
            selected = input.symptoms.len(),
            matched = ranked.len(),
            duration_band = ?band,
            "condition matching complete"
        );

        // ── Step 4: Confidence ───────────────────────────────────────────────
        let completeness = scoring::input_completeness(input);
        let confidence = scoring::confidence(&ranked, completeness, input.symptoms.len(), policy);
        debug!(confidence, completeness, "confidence computed");

        // ── Step 5: Recommendations ──────────────────────────────────────────
        let recommendations = self.recommend(&ranked, input);

        AssessmentResult {
            confidence,
            emergency_alert,
            possible_conditions: ranked,
            recommendations,
        }
    }

    /// Clamped severity of a selected symptom, or the policy default.
    fn severity_of(&self, input: &AssessmentInput, id: &SymptomId) -> Severity {
        match input.severities.get(id) {
            Some(&raw) => Severity::clamped(raw),
            None => Severity::clamped(i64::from(self.catalog.scoring().default_severity)),
        }
    }

    fn screen(&self, input: &AssessmentInput) -> Option<EmergencyAlert> {
        let threshold = self.catalog.scoring().emergency_severity;
        let triggers: Vec<SymptomId> = input
            .symptoms
            .iter()
            .filter(|id| {
                self.catalog.is_emergency_symptom(id)
                    || self.severity_of(input, id).value() >= threshold
            })
            .cloned()
            .collect();

        if triggers.is_empty() {
            return None;
        }

        let config = self.catalog.emergency();
        Some(EmergencyAlert {
            is_emergency: true,
            message: config.message.clone(),
            urgency: Urgency::Immediate,
            instructions: config.instructions.clone(),
            triggers,
        })
    }

    fn match_condition(
        &self,
        condition: &Condition,
        input: &AssessmentInput,
        band: DurationBand,
    ) -> Option<MatchedCondition> {
        let matched: Vec<&SymptomId> = condition
            .symptoms
            .iter()
            .filter(|id| input.symptoms.contains(*id))
            .collect();
        if matched.is_empty() {
            return None;
        }

        let severity_sum: u32 = matched
            .iter()
            .map(|id| u32::from(self.severity_of(input, id).value()))
            .sum();
        let mean_severity = f64::from(severity_sum) / matched.len() as f64;

        let total = condition.symptoms.len();
        let probability = scoring::condition_probability(
            matched.len(),
            total,
            mean_severity,
            band,
            self.catalog.scoring(),
        );

        Some(MatchedCondition {
            condition: condition.name.clone(),
            category: condition.category,
            probability,
            description: condition.description.clone(),
            urgency: condition.urgency,
            priority: condition.priority,
            matched_symptoms: matched.len(),
            total_symptoms: total,
        })
    }

    /// One block per distinct matched category in rank order, then the
    /// general block.
    fn recommend(&self, ranked: &[MatchedCondition], input: &AssessmentInput) -> Vec<Recommendation> {
        let mut seen: BTreeSet<SymptomCategory> = BTreeSet::new();
        let mut blocks = Vec::new();

        for entry in ranked {
            if !seen.insert(entry.category) {
                continue;
            }
            if let Some(items) = self.catalog.advice_for(entry.category) {
                blocks.push(Recommendation::Category {
                    category: entry.category.as_str().to_string(),
                    items: items.to_vec(),
                });
            }
        }

        let mut general = self.catalog.general_advice().to_vec();
        let chronic: Vec<&str> = input
            .chronic_conditions
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if !chronic.is_empty() {
            general.push(format!(
                "Tell your healthcare provider about your existing conditions: {}",
                chronic.join(", ")
            ));
        }
        blocks.push(Recommendation::General { items: general });

        blocks
    }
}

impl AnalysisBackend for SymptomAnalyzer {
    fn analyze(&self, input: &AssessmentInput) -> TriageResult<AssessmentResult> {
        Ok(SymptomAnalyzer::analyze(self, input))
    }

    fn name(&self) -> &str {
        "local"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
