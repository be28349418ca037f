//! Trait seams for the MediMate triage pipeline.
//!
//! - `AnalysisBackend`: anything that turns an assessment input into a
//!   result: the local rule-based analyzer, or a remote analysis service
//! - `HistoryStore`: where saved assessments live, keyed by user
//!
//! The wizard and the HTTP handlers depend on these traits only, so the
//! local analyzer can stand in for an unavailable remote backend and tests
//! can substitute failing or recording implementations.

use medimate_contracts::{
    assessment::{AssessmentInput, AssessmentResult},
    error::TriageResult,
    history::{HistoryPage, SavedAssessment, UserId},
};

/// Produces an assessment result from an assessment input.
///
/// Implementations must not mutate shared state: the same input must give
/// the same ranking and the same emergency-alert presence on every call.
pub trait AnalysisBackend: Send + Sync {
    /// Analyze one assessment.
    ///
    /// A remote backend returns `TriageError::RemoteAnalysisFailed` on
    /// transport or service failure; callers then fall back to local analysis.
    fn analyze(&self, input: &AssessmentInput) -> TriageResult<AssessmentResult>;

    /// Short name used in logs (e.g. "local", "remote").
    fn name(&self) -> &str;
}

/// Per-user assessment history.
///
/// Implementations treat `save` as append-only: saved assessments are never
/// modified by the service.
pub trait HistoryStore: Send + Sync {
    /// Persist one assessment for `user` and return the stored record.
    fn save(
        &self,
        user: &UserId,
        input: &AssessmentInput,
        result: &AssessmentResult,
    ) -> TriageResult<SavedAssessment>;

    /// Return up to `limit` of `user`'s assessments, newest first, along with
    /// the total count. An unknown user has an empty history.
    fn history(&self, user: &UserId, limit: usize) -> TriageResult<HistoryPage>;
}
