//! In-memory implementation of `HistoryStore`.
//!
//! `InMemoryHistoryStore` keeps each user's assessments in a `Vec`, in save
//! order, behind an `Arc<Mutex<_>>`. Clones share the same state, so the
//! HTTP handlers can each hold one.
//!
//! Each user keeps at most `retention` records; saving past the cap drops
//! that user's oldest record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info};

use medimate_contracts::{
    assessment::{AssessmentInput, AssessmentResult},
    error::{TriageError, TriageResult},
    history::{AssessmentId, HistoryPage, SavedAssessment, UserId},
};
use medimate_core::traits::HistoryStore;

/// Records kept per user when no retention is configured.
pub const DEFAULT_RETENTION: usize = 100;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
struct HistoryState {
    /// Per-user records, oldest first.
    by_user: HashMap<UserId, Vec<SavedAssessment>>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// A per-user assessment history held in memory, capped at `retention`
/// records per user.
///
/// # Thread safety
///
/// Every operation takes the internal `Mutex` for its whole duration, so a
/// concurrent `save` and `history` for the same user never observe a
/// half-written record.
#[derive(Clone)]
pub struct InMemoryHistoryStore {
    state: Arc<Mutex<HistoryState>>,
    retention: usize,
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that keeps at most `per_user` records for each user.
    /// A cap of zero is raised to one.
    pub fn with_retention(per_user: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(HistoryState::default())),
            retention: per_user.max(1),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Total number of saved assessments across all users.
    pub fn len(&self) -> TriageResult<usize> {
        let state = self.lock()?;
        Ok(state.by_user.values().map(Vec::len).sum())
    }

    pub fn is_empty(&self) -> TriageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> TriageResult<MutexGuard<'_, HistoryState>> {
        self.state.lock().map_err(|e| TriageError::HistoryWriteFailed {
            reason: format!("history state lock poisoned: {}", e),
        })
    }
}

// ── HistoryStore impl ─────────────────────────────────────────────────────────

impl HistoryStore for InMemoryHistoryStore {
    /// Append one assessment to `user`'s history.
    ///
    /// The record gets a fresh `AssessmentId` and the current UTC time. The
    /// input is stored as supplied, raw severities included.
    fn save(
        &self,
        user: &UserId,
        input: &AssessmentInput,
        result: &AssessmentResult,
    ) -> TriageResult<SavedAssessment> {
        let record = SavedAssessment {
            id: AssessmentId::new(),
            user_id: user.clone(),
            input: input.clone(),
            results: result.clone(),
            timestamp: Utc::now(),
        };

        let mut state = self.lock()?;
        let entries = state.by_user.entry(user.clone()).or_default();
        entries.push(record.clone());
        if entries.len() > self.retention {
            let dropped = entries.len() - self.retention;
            entries.drain(..dropped);
            debug!(user_id = %user, dropped, retention = self.retention, "history trimmed");
        }

        info!(
            assessment_id = %record.id,
            stored = entries.len(),
            emergency = result.is_emergency(),
            "assessment saved"
        );

        Ok(record)
    }

    /// Newest first, at most `limit` entries; `total` counts everything still retained.
    fn history(&self, user: &UserId, limit: usize) -> TriageResult<HistoryPage> {
        let state = self.lock()?;
        let (assessments, total) = match state.by_user.get(user) {
            Some(entries) => (entries.iter().rev().take(limit).cloned().collect(), entries.len()),
            None => (Vec::new(), 0),
        };

        debug!(returned = assessments.len(), total, limit, "history read");

        Ok(HistoryPage { assessments, total })
    }
}
