//! Server configuration.
//!
//! Loaded from an optional TOML file; command-line flags override it.
//!
//! ```toml
//! bind_addr = "0.0.0.0:3000"
//! catalog_path = "catalog/clinic.toml"
//! history_limit = 10
//! history_retention = 100
//!
//! [[sessions]]
//! user_id = "asha"
//! token = "dev-token-asha"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use medimate_contracts::error::{TriageError, TriageResult};
use medimate_history::DEFAULT_RETENTION;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
/// Upper bound on `?limit=` for the history endpoint.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// A pre-issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeed {
    pub user_id: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: String,
    /// Catalog file; the embedded catalog when absent.
    pub catalog_path: Option<PathBuf>,
    /// Entries returned by the history endpoint when no limit is given.
    pub history_limit: usize,
    /// Assessments kept per user; older ones are dropped on save.
    pub history_retention: usize,
    pub sessions: Vec<SessionSeed>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            catalog_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_retention: DEFAULT_RETENTION,
            sessions: Vec::new(),
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        let config: ServiceConfig = toml::from_str(s).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to parse service config TOML: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to read service config '{}': {e}", path.display()),
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), sessions = config.sessions.len(), "service config loaded");
        Ok(config)
    }

    fn validate(&self) -> TriageResult<()> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(TriageError::ConfigError {
                reason: format!("history_limit must be between 1 and {MAX_HISTORY_LIMIT}"),
            });
        }
        if self.history_retention < self.history_limit {
            return Err(TriageError::ConfigError {
                reason: format!(
                    "history_retention ({}) must be at least history_limit ({})",
                    self.history_retention, self.history_limit
                ),
            });
        }
        if let Some(seed) = self.sessions.iter().find(|s| s.token.trim().is_empty()) {
            return Err(TriageError::ConfigError {
                reason: format!("session for '{}' has an empty token", seed.user_id),
            });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
