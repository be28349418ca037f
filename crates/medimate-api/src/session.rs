//! Bearer-token sessions.
//!
//! Tokens are issued out of band (seeded from the service configuration or
//! created with `issue`). The registry keeps only the hex SHA-256 digest of
//! each token, mapped to the user it authenticates.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::{debug, info};

use medimate_contracts::{
    error::{TriageError, TriageResult},
    history::UserId,
};

/// Hex SHA-256 digest of a bearer token.
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a random bearer token (two v4 UUIDs, 244 bits of entropy).
pub fn generate_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Token digest → user map shared by all handlers.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    digests: Arc<RwLock<HashMap<String, UserId>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing token for `user`.
    pub fn insert(&self, token: &str, user: UserId) -> TriageResult<()> {
        let mut digests = self.digests.write().map_err(|_| lock_poisoned())?;
        info!(user_id = %user, "session registered");
        digests.insert(hash_token(token), user);
        Ok(())
    }

    /// Create a fresh token for `user` and return it. Only the digest is kept.
    pub fn issue(&self, user: UserId) -> TriageResult<String> {
        let token = generate_token();
        self.insert(&token, user)?;
        Ok(token)
    }

    /// The user a token belongs to, if any.
    pub fn validate(&self, token: &str) -> TriageResult<Option<UserId>> {
        let digests = self.digests.read().map_err(|_| lock_poisoned())?;
        Ok(digests.get(&hash_token(token)).cloned())
    }

    /// Forget a token. Returns whether it was registered.
    pub fn revoke(&self, token: &str) -> TriageResult<bool> {
        let mut digests = self.digests.write().map_err(|_| lock_poisoned())?;
        Ok(digests.remove(&hash_token(token)).is_some())
    }

    /// Resolve the caller from request headers.
    ///
    /// `Ok(None)` when no token is presented or it is not registered.
    pub fn authenticate(&self, headers: &HeaderMap) -> TriageResult<Option<UserId>> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };
        let user = self.validate(token)?;
        if user.is_none() {
            debug!("bearer token not recognised");
        }
        Ok(user)
    }

    /// Like `authenticate`, but a missing or unknown token is `Unauthorized`.
    pub fn require(&self, headers: &HeaderMap) -> TriageResult<UserId> {
        self.authenticate(headers)?.ok_or(TriageError::Unauthorized)
    }

    /// Number of registered tokens.
    pub fn count(&self) -> TriageResult<usize> {
        let digests = self.digests.read().map_err(|_| lock_poisoned())?;
        Ok(digests.len())
    }
}

fn lock_poisoned() -> TriageError {
    TriageError::ConfigError {
        reason: "session registry lock poisoned".to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
