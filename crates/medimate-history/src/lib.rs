//! # medimate-history
//!
//! Per-user assessment history for the MediMate triage service.
//!
//! ## Overview
//!
//! Saved assessments are never modified: `save` appends a new record with a
//! generated `AssessmentId` and timestamp, and `history` returns a user's
//! records newest first. The in-memory store is the only backend; records
//! do not survive a restart, and each user keeps at most `retention` of them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medimate_history::InMemoryHistoryStore;
//! use medimate_core::traits::HistoryStore;
//!
//! let store = InMemoryHistoryStore::new();
//! let saved = store.save(&user, &input, &result)?;
//! let page = store.history(&user, 10)?;
//! ```

pub mod memory;

pub use memory::{InMemoryHistoryStore, DEFAULT_RETENTION};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::thread;

    use medimate_contracts::{
        assessment::{AssessmentInput, AssessmentResult},
        history::UserId,
    };
    use medimate_core::traits::HistoryStore;

    use crate::InMemoryHistoryStore;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn user(name: &str) -> UserId {
        UserId(name.to_string())
    }

    fn result(confidence: u8) -> AssessmentResult {
        AssessmentResult {
            confidence,
            emergency_alert: None,
            possible_conditions: vec![],
            recommendations: vec![],
        }
    }

    // ── 1. save ───────────────────────────────────────────────────────────────

    #[test]
    fn test_save_assigns_id_and_keeps_raw_input() {
        let store = InMemoryHistoryStore::new();
        let input = AssessmentInput::with_symptoms(["cough"]).severity("cough", 9);

        let saved = store.save(&user("asha"), &input, &result(60)).unwrap();

        assert!(saved.id.0.starts_with("assessment_"));
        assert_eq!(saved.user_id, user("asha"));
        assert_eq!(saved.input, input);
        assert_eq!(saved.results.confidence, 60);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_saved_record_flattens_input_on_the_wire() {
        let store = InMemoryHistoryStore::new();
        let input = AssessmentInput::with_symptoms(["cough"]).age_group("adult");
        let saved = store.save(&user("asha"), &input, &result(55)).unwrap();

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["userId"], "asha");
        assert_eq!(json["ageGroup"], "adult");
        assert_eq!(json["symptoms"][0], "cough");
        assert_eq!(json["results"]["confidence"], 55);
        assert!(json["timestamp"].is_string());
    }

    // ── 2. history ────────────────────────────────────────────────────────────

    #[test]
    fn test_history_is_newest_first_and_limited() {
        let store = InMemoryHistoryStore::new();
        let input = AssessmentInput::with_symptoms(["fever"]);
        for confidence in 50..62 {
            store.save(&user("ravi"), &input, &result(confidence)).unwrap();
        }

        let page = store.history(&user("ravi"), 10).unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.assessments.len(), 10);
        assert_eq!(page.assessments[0].results.confidence, 61);
        assert_eq!(page.assessments[9].results.confidence, 52);
    }

    #[test]
    fn test_history_for_unknown_user_is_empty() {
        let store = InMemoryHistoryStore::new();
        let page = store.history(&user("nobody"), 10).unwrap();
        assert!(page.assessments.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_history_is_isolated_per_user() {
        let store = InMemoryHistoryStore::new();
        let input = AssessmentInput::with_symptoms(["fever"]);
        store.save(&user("asha"), &input, &result(50)).unwrap();
        store.save(&user("ravi"), &input, &result(70)).unwrap();

        let asha = store.history(&user("asha"), 10).unwrap();
        assert_eq!(asha.total, 1);
        assert_eq!(asha.assessments[0].results.confidence, 50);
    }

    #[test]
    fn test_zero_limit_still_reports_total() {
        let store = InMemoryHistoryStore::new();
        store
            .save(&user("asha"), &AssessmentInput::with_symptoms(["cough"]), &result(50))
            .unwrap();
        let page = store.history(&user("asha"), 0).unwrap();
        assert!(page.assessments.is_empty());
        assert_eq!(page.total, 1);
    }

    // ── 3. retention ──────────────────────────────────────────────────────────

    #[test]
    fn test_retention_drops_oldest_records() {
        let store = InMemoryHistoryStore::with_retention(2);
        for confidence in [50, 60, 70] {
            store
                .save(&user("asha"), &AssessmentInput::with_symptoms(["cough"]), &result(confidence))
                .unwrap();
        }

        let page = store.history(&user("asha"), 10).unwrap();
        assert_eq!(page.total, 2);
        let kept: Vec<u8> = page.assessments.iter().map(|a| a.results.confidence).collect();
        assert_eq!(kept, vec![70, 60]);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_retention_is_per_user() {
        let store = InMemoryHistoryStore::with_retention(1);
        let input = AssessmentInput::with_symptoms(["cough"]);
        store.save(&user("asha"), &input, &result(50)).unwrap();
        store.save(&user("ravi"), &input, &result(60)).unwrap();

        assert_eq!(store.history(&user("asha"), 10).unwrap().total, 1);
        assert_eq!(store.history(&user("ravi"), 10).unwrap().total, 1);
    }

    #[test]
    fn test_default_retention_and_zero_cap() {
        assert_eq!(InMemoryHistoryStore::new().retention(), crate::DEFAULT_RETENTION);
        assert_eq!(InMemoryHistoryStore::with_retention(0).retention(), 1);
    }

    // ── 4. concurrency ────────────────────────────────────────────────────────

    /// Clones share state; concurrent saves are all recorded.
    #[test]
    fn test_concurrent_saves_all_land() {
        let store = InMemoryHistoryStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || {
                    let input = AssessmentInput::with_symptoms(["cough"]);
                    store.save(&user("shared"), &input, &result(50 + i)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.history(&user("shared"), 100).unwrap().total, 8);
        assert!(!store.is_empty().unwrap());
    }
}
