//! Shared state handed to every handler.

use std::sync::Arc;

use medimate_catalog::Catalog;
use medimate_contracts::{error::TriageResult, history::UserId};
use medimate_core::{traits::HistoryStore, SymptomAnalyzer};
use medimate_history::InMemoryHistoryStore;
use medimate_verify::{RequestVerifier, ResultVerifier};

use crate::{config::ServiceConfig, session::SessionRegistry};

/// Everything a handler needs, cheap to clone.
///
/// The catalog and verifiers are immutable after startup; history and
/// sessions carry their own locks.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: SymptomAnalyzer,
    pub history: Arc<dyn HistoryStore>,
    pub sessions: SessionRegistry,
    pub analyze_verifier: Arc<RequestVerifier>,
    pub save_verifier: Arc<RequestVerifier>,
    pub result_verifier: ResultVerifier,
    pub history_limit: usize,
}

impl ApiContext {
    /// Build a context with an in-memory history and the config's seed sessions.
    pub fn new(catalog: Arc<Catalog>, config: &ServiceConfig) -> TriageResult<Self> {
        let sessions = SessionRegistry::new();
        for seed in &config.sessions {
            sessions.insert(&seed.token, UserId(seed.user_id.clone()))?;
        }

        Ok(Self {
            analyzer: SymptomAnalyzer::new(catalog),
            history: Arc::new(InMemoryHistoryStore::with_retention(config.history_retention)),
            sessions,
            analyze_verifier: Arc::new(RequestVerifier::analyze()?),
            save_verifier: Arc::new(RequestVerifier::save_assessment()?),
            result_verifier: ResultVerifier::new(),
            history_limit: config.history_limit,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        self.analyzer.catalog()
    }
}
